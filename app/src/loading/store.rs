//! The reactive loading store and its context plumbing.
//!
//! One `LoadingStore` is created by `provide_loading` when the application
//! shell mounts and is shared with the whole tree through context.

use leptos::prelude::*;

use super::{
    error::LoadingError,
    guard::LoadingGuard,
    options::{LoaderOptions, LoaderOptionsPatch},
    sink::LoadingSink,
    state::{DEFAULT_MESSAGE, LoadingState},
};

/// Handle to the shared loading state.
///
/// The handle is `Copy` and stays the same value for the lifetime of the
/// shell, so capturing it in effects and closures never changes what they
/// depend on.
#[derive(Debug, Clone, Copy)]
pub struct LoadingStore {
    state: RwSignal<LoadingState>,
}

impl Default for LoadingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(LoadingState::default()),
        }
    }

    /// Shows the loader. `None` uses `"Loading..."`; the patch is merged over
    /// the default options.
    pub fn show(&self, message: Option<&str>, options: LoaderOptionsPatch) {
        LoadingSink::show(self, message.unwrap_or(DEFAULT_MESSAGE), options.resolve());
    }

    /// Hides the loader. Subscribers are not notified if it was already hidden.
    pub fn hide(&self) {
        LoadingSink::hide(self);
    }

    /// Shows the loader until the returned guard is dropped.
    pub fn guard(&self, message: Option<&str>, options: LoaderOptionsPatch) -> LoadingGuard<Self> {
        LoadingGuard::acquire(*self, message.unwrap_or(DEFAULT_MESSAGE), options.resolve())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|state| state.is_loading)
    }

    pub fn message(&self) -> String {
        self.state.with(|state| state.message.clone())
    }

    pub fn options(&self) -> LoaderOptions {
        self.state.with(|state| state.options)
    }

    /// Full state, tracked.
    pub fn snapshot(&self) -> LoadingState {
        self.state.get()
    }

    pub fn snapshot_untracked(&self) -> LoadingState {
        self.state.get_untracked()
    }
}

impl LoadingSink for LoadingStore {
    fn show(&self, message: &str, options: LoaderOptions) {
        tracing::debug!(message, ?options, "loader shown");
        self.state.update(|state| state.show(message, options));
    }

    fn hide(&self) {
        self.state.maybe_update(|state| {
            let changed = state.hide();
            if changed {
                tracing::debug!("loader hidden");
            }
            changed
        });
    }
}

/// Creates the shell's loading store and puts it in context.
///
/// Calling this again under the same owner tree hands back the existing store
/// instead of shadowing it with a second one.
pub fn provide_loading() -> LoadingStore {
    if let Some(existing) = use_context::<LoadingStore>() {
        tracing::warn!("loading store already provided; reusing it");
        return existing;
    }
    let store = LoadingStore::new();
    provide_context(store);
    store
}

/// Looks up the loading store without panicking.
pub fn try_use_loading() -> Result<LoadingStore, LoadingError> {
    use_context::<LoadingStore>().ok_or(LoadingError::MissingProvider {
        hook: "use_loading",
        provider: "provide_loading",
    })
}

/// Looks up the loading store.
///
/// # Panics
///
/// Panics when called outside a tree set up with `provide_loading`. A missing
/// provider is a wiring bug, and an invisible or stuck loader is a worse way to
/// find out about it.
pub fn use_loading() -> LoadingStore {
    try_use_loading().unwrap_or_else(|err| panic!("{err}"))
}
