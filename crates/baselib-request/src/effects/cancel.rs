use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::future::{AbortHandle, AbortRegistration};
use tracing::debug;

/// Abort handles of chunked requests, keyed by URL.
///
/// At most one handle per key is kept. Registering a new one replaces the
/// old entry without aborting it unless asked to; aborting leaves the entry
/// in place. Entries are never evicted.
#[derive(Debug, Default)]
pub struct CancelRegistry {
    handles: Mutex<HashMap<String, AbortHandle>>,
}

impl CancelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh handle for `key` and return its registration.
    ///
    /// When `cancel_previous` is set, the handle being replaced is aborted
    /// first.
    pub fn register(&self, key: &str, cancel_previous: bool) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        let previous = self.lock().insert(key.to_owned(), handle);
        if let Some(previous) = previous
            && cancel_previous
        {
            debug!(url = key, "aborting previous request");
            previous.abort();
        }
        registration
    }

    /// Abort the request registered under `key`.
    ///
    /// Returns `false` when nothing was ever registered for it.
    pub fn abort(&self, key: &str) -> bool {
        match self.lock().get(key) {
            Some(handle) => {
                debug!(url = key, "aborting request");
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, AbortHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
