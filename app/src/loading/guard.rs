//! Scoped acquisition of the loading flag.

use super::{options::LoaderOptions, sink::LoadingSink};

/// Shows the loader on creation and hides it when dropped.
///
/// Dropping happens on every exit path: normal scope end, `?`, panic
/// unwinding, and a surrounding future being dropped mid-`await`.
#[must_use = "the loader is hidden as soon as the guard is dropped"]
pub struct LoadingGuard<S: LoadingSink> {
    sink: S,
}

impl<S: LoadingSink> LoadingGuard<S> {
    pub fn acquire(sink: S, message: &str, options: LoaderOptions) -> Self {
        sink.show(message, options);
        Self { sink }
    }

    /// Hides now. Same as dropping, but reads better at call sites.
    pub fn release(self) {}
}

impl<S: LoadingSink> Drop for LoadingGuard<S> {
    fn drop(&mut self) {
        self.sink.hide();
    }
}
