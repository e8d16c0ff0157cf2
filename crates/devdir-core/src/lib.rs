// devdir-core: Observable device directory state between devdir-api and consumers (CLI).

pub mod config;
pub mod directory;
pub mod error;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DirectoryConfig, TlsVerification};
pub use directory::DeviceDirectory;
pub use error::CoreError;
pub use store::{DirectorySnapshot, DirectoryState, StateVersions};
pub use stream::{StateStream, StateWatchStream};

pub use devdir_api::Device;
