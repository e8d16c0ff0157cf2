// ── Core error types ──
//
// Fetch failures never leave the directory as errors: they are recorded
// in the observable `error` cell. `CoreError` only covers what can go
// wrong while setting a directory up.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("TLS setup failed: {message}")]
    Tls { message: String },
}

impl CoreError {
    pub(crate) fn from_api(err: devdir_api::Error, base_url: &str) -> Self {
        match err {
            devdir_api::Error::InvalidUrl(e) => Self::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            },
            devdir_api::Error::Tls(message) => Self::Tls { message },
            // Building a client yields only the two variants above.
            other => Self::Tls {
                message: other.to_string(),
            },
        }
    }
}
