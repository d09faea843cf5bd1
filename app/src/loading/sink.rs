//! The seam between loading logic and whatever holds the state.
//!
//! `ComponentLoading` and `run_with_loader` only ever talk to a `LoadingSink`.
//! In the app that is the reactive `LoadingStore`; in tests it is a mock or a
//! plain `RefCell<LoadingState>`.

use core::cell::RefCell;

use super::{options::LoaderOptions, state::LoadingState};

/// Receives resolved `show` / `hide` commands.
#[cfg_attr(test, mockall::automock)]
pub trait LoadingSink {
    fn show(&self, message: &str, options: LoaderOptions);
    fn hide(&self);
}

impl<S: LoadingSink + ?Sized> LoadingSink for &S {
    fn show(&self, message: &str, options: LoaderOptions) {
        (**self).show(message, options);
    }

    fn hide(&self) {
        (**self).hide();
    }
}

impl LoadingSink for RefCell<LoadingState> {
    fn show(&self, message: &str, options: LoaderOptions) {
        self.borrow_mut().show(message, options);
    }

    fn hide(&self) {
        self.borrow_mut().hide();
    }
}
