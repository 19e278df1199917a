//! Loading and error bookkeeping shared by every store.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;

use rag_client::ApiResponse;

/// Counter of operations currently running.
///
/// Each operation holds an [`InFlightGuard`]; the counter is decremented when
/// the guard drops, including when the owning future is dropped mid-call.
#[derive(Debug, Default)]
pub struct InFlight(AtomicUsize);

impl InFlight {
    pub fn enter(&self) -> InFlightGuard<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(&self.0)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

/// Keeps an [`InFlight`] counter raised while alive.
#[derive(Debug)]
#[must_use = "the operation is only tracked while the guard is alive"]
pub struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Loading flag and last error message of one store.
#[derive(Debug)]
pub struct StoreStatus {
    store: &'static str,
    loading: InFlight,
    error: Mutex<Option<String>>,
}

impl StoreStatus {
    #[must_use]
    pub fn new(store: &'static str) -> Self {
        Self {
            store,
            loading: InFlight::default(),
            error: Mutex::new(None),
        }
    }

    /// Mark the store loading and clear its error.
    pub async fn begin(&self) -> InFlightGuard<'_> {
        let guard = self.loading.enter();
        self.error.lock().await.take();
        guard
    }

    /// Unwrap a response, recording its failure message on error.
    pub async fn settle<T>(&self, operation: &str, response: ApiResponse<T>) -> Option<T> {
        match response.into_result() {
            Ok(data) => Some(data),
            Err(failure) => {
                tracing::warn!(store = self.store, operation, error = %failure, "store operation failed");
                *self.error.lock().await = Some(failure.message);
                None
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub async fn error(&self) -> Option<String> {
        self.error.lock().await.clone()
    }

    pub async fn clear_error(&self) {
        self.error.lock().await.take();
    }
}
