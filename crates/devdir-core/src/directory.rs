// ── Device directory ──
//
// Fetches the device list from the API and publishes it, together with
// loading and error status, through observable cells. At most one request
// is outstanding per directory; calls that arrive meanwhile are dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use devdir_api::{DirectoryClient, TlsMode, TransportConfig};

use crate::config::{DirectoryConfig, TlsVerification};
use crate::error::CoreError;
use crate::store::{DirectorySnapshot, DirectoryState};
use crate::stream::StateStream;
use crate::Device;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DirectoryInner>`; clones share the same
/// state and the same in-flight guard.
#[derive(Clone)]
pub struct DeviceDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    client: DirectoryClient,
    state: Arc<DirectoryState>,
}

impl DeviceDirectory {
    /// Create a directory from configuration. Does not fetch anything.
    pub fn new(config: &DirectoryConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = DirectoryClient::new(&config.base_url, &transport)
            .map_err(|e| CoreError::from_api(e, &config.base_url))?;
        Ok(Self::with_client(client))
    }

    /// Create a directory around a pre-built API client.
    pub fn with_client(client: DirectoryClient) -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                client,
                state: Arc::new(DirectoryState::new()),
            }),
        }
    }

    /// The resolved request target.
    pub fn devices_url(&self) -> &url::Url {
        self.inner.client.devices_url()
    }

    /// Access the underlying state cells.
    pub fn state(&self) -> &DirectoryState {
        &self.inner.state
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch the device list into the directory state.
    ///
    /// Returns immediately, without touching any state, when a fetch is
    /// already in flight (even if `force` is set) or when `force` is
    /// `false` and devices are already cached. Otherwise sets `loading`,
    /// clears `error`, and issues the request.
    ///
    /// Failures are recorded in the `error` cell and leave the cached
    /// devices in place. Once admitted, the request runs to completion even
    /// if the returned future is dropped.
    pub async fn fetch_devices(&self, force: bool) {
        let guard = match self.inner.state.begin_fetch(force) {
            Ok(guard) => guard,
            Err(reason) => {
                debug!(?reason, force, "device fetch skipped");
                return;
            }
        };

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = inner.client.list_devices().await;
            guard.complete(result);
        });

        if let Err(e) = task.await {
            warn!(error = %e, "device fetch task did not complete");
        }
    }

    /// Fetch only if nothing is cached yet.
    pub async fn fetch_devices_cached(&self) {
        self.fetch_devices(false).await;
    }

    // ── Current values ───────────────────────────────────────────────

    pub fn devices(&self) -> Arc<Vec<Device>> {
        self.inner.state.devices()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.error()
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.inner.state.snapshot()
    }

    pub fn device_by_id(&self, id: &str) -> Option<Device> {
        self.inner.state.device_by_id(id)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> StateStream<Arc<Vec<Device>>> {
        StateStream::new(self.inner.state.watch_devices())
    }

    pub fn subscribe_loading(&self) -> StateStream<bool> {
        StateStream::new(self.inner.state.watch_loading())
    }

    pub fn subscribe_error(&self) -> StateStream<Option<String>> {
        StateStream::new(self.inner.state.watch_error())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn build_transport(config: &DirectoryConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
