// src/services/search_debouncer.rs
//
// Turns raw keystrokes into searches once typing pauses

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::task::{AbortHandle, JoinHandle};

use crate::services::sync_service::{CatalogSynchronizer, SyncOutcome};

pub struct SearchDebouncer {
    synchronizer: Arc<CatalogSynchronizer>,
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl SearchDebouncer {
    pub fn new(synchronizer: Arc<CatalogSynchronizer>, delay: Duration) -> Self {
        Self {
            synchronizer,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a search for `keyword` after the quiet period. A newer
    /// keystroke cancels this one, in which case the handle resolves to a
    /// cancellation error.
    pub fn keystroke(&self, keyword: &str) -> JoinHandle<Option<SyncOutcome>> {
        let synchronizer = Arc::clone(&self.synchronizer);
        let delay = self.delay;
        let keyword = keyword.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match synchronizer.on_search(&keyword) {
                Ok(fetch) => fetch.await.ok(),
                Err(_) => None,
            }
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.replace(handle.abort_handle()) {
            debug!("search debounce: dropping pending keystroke");
            previous.abort();
        }

        handle
    }

    /// Drop the pending keystroke, if any
    pub fn cancel(&self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}
