//! Wraps an async operation so the global loader is up for exactly its duration.

use core::future::Future;

use super::{
    guard::LoadingGuard, options::LoaderOptionsPatch, sink::LoadingSink, store::LoadingStore,
    store::use_loading,
};

/// Message used by `run_with_loader` when the caller gives none.
pub const DEFAULT_FETCH_MESSAGE: &str = "Loading data...";

/// Shows the loader, awaits `operation`, hides the loader, and returns the
/// operation's output untouched.
///
/// The hide is tied to a `LoadingGuard`, so it also happens when the operation
/// panics or when this future is dropped before completing. Errors are not
/// translated: a `Result` comes back exactly as the operation produced it.
///
/// Overlapping calls share one flag. Whichever call finishes first hides the
/// loader, even if another is still running.
pub async fn run_with_loader<S, F, Fut, T>(
    sink: S,
    operation: F,
    message: Option<&str>,
    options: LoaderOptionsPatch,
) -> T
where
    S: LoadingSink,
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let guard = LoadingGuard::acquire(
        sink,
        message.unwrap_or(DEFAULT_FETCH_MESSAGE),
        options.resolve(),
    );
    let output = operation().await;
    guard.release();
    output
}

/// Component-facing entry point for `run_with_loader`.
#[derive(Debug, Clone, Copy)]
pub struct DataLoading {
    store: LoadingStore,
}

impl DataLoading {
    pub const fn new(store: LoadingStore) -> Self {
        Self { store }
    }

    pub async fn fetch_with_loading<F, Fut, T>(
        self,
        operation: F,
        message: Option<&str>,
        options: LoaderOptionsPatch,
    ) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        run_with_loader(self.store, operation, message, options).await
    }
}

/// # Panics
///
/// Panics when no loading store has been provided (see `provide_loading`).
pub fn use_data_loading() -> DataLoading {
    DataLoading::new(use_loading())
}
