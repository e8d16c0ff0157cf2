// ── Generic observable cell ──
//
// A single value behind a `watch` channel plus a version counter that is
// bumped on every notifying write.

use tokio::sync::watch;

/// One independently observable piece of directory state.
pub(crate) struct StateCell<T: Clone + Send + Sync + 'static> {
    value: watch::Sender<T>,

    /// Version counter, bumped on every notifying write.
    version: watch::Sender<u64>,
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (value, _) = watch::channel(initial);
        let (version, _) = watch::channel(0u64);
        Self { value, version }
    }

    /// Current value (clone).
    pub(crate) fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Read the current value without cloning it.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    /// Overwrite unconditionally and notify subscribers.
    pub(crate) fn replace(&self, value: T) {
        // `send_replace` updates even with zero receivers.
        self.value.send_replace(value);
        self.bump_version();
    }

    /// Mutate in place under the channel's write lock. Subscribers are
    /// notified only when `f` returns `true`.
    pub(crate) fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let modified = self.value.send_if_modified(f);
        if modified {
            self.bump_version();
        }
        modified
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> StateCell<T> {
    /// Store `value` if it differs from the current one. Returns `true`
    /// when subscribers were notified.
    pub(crate) fn set(&self, value: T) -> bool {
        self.update_if(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}
