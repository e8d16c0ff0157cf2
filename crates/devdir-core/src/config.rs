// ── Runtime directory configuration ──
//
// Describes *where* the device API lives and how to reach it.
// Never touches disk: devdir-config (or any embedder) builds one
// and hands it to `DeviceDirectory::new`.

use std::path::PathBuf;
use std::time::Duration;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled root store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for one device directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// API base URL (e.g. `https://inventory.example.com/api`). A single
    /// trailing slash is ignored.
    pub base_url: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout enforced by the HTTP transport.
    pub timeout: Duration,
}

impl DirectoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
