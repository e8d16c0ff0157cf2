//! Flag-aware configuration resolution.
//!
//! Thin wrapper over `devdir_config` that applies CLI flag overrides and
//! produces the `DirectoryConfig` handed to core.

use std::time::Duration;

use devdir_config::{Config, ConfigError, Profile};
use devdir_core::{DirectoryConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use devdir_config::{config_path, load_config, save_config};

/// Name of the profile to use: `--profile`, else the config's default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the directory configuration from flags, profile, and defaults.
///
/// `--api-url` works without any config file. Otherwise the active
/// profile must exist; an explicitly requested missing profile is an error.
pub fn resolve_directory_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<DirectoryConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = match (&global.api_url, cfg.profiles.get(&profile_name)) {
        (Some(url), existing) => {
            let mut profile = existing.cloned().unwrap_or_else(|| Profile::new(url.clone()));
            profile.api_url.clone_from(url);
            profile
        }
        (None, Some(existing)) => existing.clone(),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::from(ConfigError::ProfileNotFound {
                name: profile_name,
                available: cfg.profile_names(),
            }));
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    let mut directory = devdir_config::profile_to_directory_config(&profile, &cfg.defaults)?;

    if global.insecure {
        directory.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        directory.timeout = Duration::from_secs(secs);
    }

    Ok(directory)
}
