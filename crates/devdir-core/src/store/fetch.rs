// ── Fetch admission and completion ──
//
// The guard check and the `loading = true` transition happen together
// under the loading cell's write lock, so two callers can never both be
// admitted. The previous error is cleared under the same lock. The
// returned `InFlight` token resets `loading` when dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use super::DirectoryState;
use crate::Device;

/// Message recorded when a fetch dies without a typed error.
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error";

/// Why a fetch request was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    /// Another fetch is outstanding.
    InFlight,
    /// Not forced and the collection is already populated.
    Cached,
}

/// Proof that this caller owns the single in-flight fetch.
pub(crate) struct InFlight {
    state: Arc<DirectoryState>,
}

impl DirectoryState {
    /// Admit a fetch, or say why not. Rejection has no side effects.
    pub(crate) fn begin_fetch(self: &Arc<Self>, force: bool) -> Result<InFlight, SkipReason> {
        let mut skipped = None;

        self.loading.update_if(|loading| {
            if *loading {
                skipped = Some(SkipReason::InFlight);
                return false;
            }
            if !force && self.devices.with(|d| !d.is_empty()) {
                skipped = Some(SkipReason::Cached);
                return false;
            }
            // Cleared before `loading` subscribers are woken.
            self.error.set(None);
            *loading = true;
            true
        });

        if let Some(reason) = skipped {
            return Err(reason);
        }

        Ok(InFlight {
            state: Arc::clone(self),
        })
    }
}

impl InFlight {
    /// Record the outcome. Devices are replaced only on success.
    pub(crate) fn complete(self, result: Result<Vec<Device>, devdir_api::Error>) {
        match result {
            Ok(devices) => {
                debug!(count = devices.len(), "device fetch complete");
                self.state.devices.replace(Arc::new(devices));
            }
            Err(err) => {
                warn!(error = %err, "device fetch failed");
                self.state.error.set(Some(err.to_string()));
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.state.error.set(Some(UNKNOWN_ERROR.to_owned()));
        }
        self.state.loading.set(false);
    }
}
