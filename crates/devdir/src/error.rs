//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use devdir_config::ConfigError;
use devdir_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const FETCH: i32 = 7;
    pub const CONFIG: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Fetch ────────────────────────────────────────────────────────

    #[error("Could not load devices from {url}")]
    #[diagnostic(
        code(devdir::fetch_failed),
        help(
            "{message}\n\
             Check that the API is reachable. Self-signed certificate? Try --insecure (-k)."
        )
    )]
    FetchFailed { url: String, message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("device '{identifier}' not found")]
    #[diagnostic(
        code(devdir::not_found),
        help("Run: devdir devices list to see available devices")
    )]
    NotFound { identifier: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(devdir::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No device API configured")]
    #[diagnostic(
        code(devdir::no_config),
        help(
            "Pass --api-url, set DEVDIR_API_URL, or create a profile with:\n\
             devdir config init --url <URL>\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(devdir::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: devdir config init --profile {name} --url <URL>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(devdir::config))]
    Config(ConfigError),

    #[error("Could not set up the device directory: {0}")]
    #[diagnostic(code(devdir::setup))]
    Setup(CoreError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed { .. } => exit_code::FETCH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::ProfileNotFound { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Setup(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── Library error → CliError mapping ─────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidBaseUrl { url, reason } => Self::Validation {
                field: "api_url".into(),
                reason: format!("{url}: {reason}"),
            },
            other => Self::Setup(other),
        }
    }
}
