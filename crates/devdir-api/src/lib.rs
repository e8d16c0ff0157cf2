// devdir-api: Async Rust client for the device directory REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DirectoryClient;
pub use error::Error;
pub use models::Device;
pub use transport::{TlsMode, TransportConfig};
