// ── Directory state ──
//
// The three observable cells a `DeviceDirectory` owns. Only the directory
// writes them; everyone else reads or subscribes.

use std::sync::Arc;

use tokio::sync::watch;

use super::cell::StateCell;
use crate::Device;

/// Observable state for one device directory.
///
/// - `devices`: ordered, replaced wholesale by each successful fetch
/// - `loading`: `true` strictly while a fetch is in flight
/// - `error`: message of the last failed fetch, cleared when a new one starts
pub struct DirectoryState {
    pub(crate) devices: StateCell<Arc<Vec<Device>>>,
    pub(crate) loading: StateCell<bool>,
    pub(crate) error: StateCell<Option<String>>,
}

/// Point-in-time copy of all three cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySnapshot {
    pub devices: Arc<Vec<Device>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Per-cell write counters. Two equal `StateVersions` mean nothing was
/// written in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateVersions {
    pub devices: u64,
    pub loading: u64,
    pub error: u64,
}

impl DirectoryState {
    pub(crate) fn new() -> Self {
        Self {
            devices: StateCell::new(Arc::new(Vec::new())),
            loading: StateCell::new(false),
            error: StateCell::new(None),
        }
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn devices(&self) -> Arc<Vec<Device>> {
        self.devices.get()
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    pub fn device_count(&self) -> usize {
        self.devices.with(|d| d.len())
    }

    /// Look up a cached device by id.
    pub fn device_by_id(&self, id: &str) -> Option<Device> {
        self.devices.with(|d| d.iter().find(|dev| dev.id == id).cloned())
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            devices: self.devices(),
            loading: self.loading(),
            error: self.error(),
        }
    }

    pub fn versions(&self) -> StateVersions {
        StateVersions {
            devices: self.devices.version(),
            loading: self.loading.version(),
            error: self.error.version(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn watch_devices(&self) -> watch::Receiver<Arc<Vec<Device>>> {
        self.devices.subscribe()
    }

    pub fn watch_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn watch_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }
}
