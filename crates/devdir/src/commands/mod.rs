//! Command dispatch: bridges CLI args -> directory operations -> output formatting.

pub mod config_cmd;
pub mod devices;

use devdir_core::DeviceDirectory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a directory-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    directory: &DeviceDirectory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(directory, args, global).await,
        // Config and Completions are handled before a directory exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
