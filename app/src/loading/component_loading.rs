//! Lets a feature component declare "I am busy" with a boolean signal.
//!
//! Only transitions of that boolean reach the store. The effect driving the
//! tracker subscribes to the caller's signal alone; the store handle it writes
//! to is `Copy` and never read reactively, so store updates cannot re-run it.

use leptos::prelude::*;

use super::{
    options::{LoaderOptions, LoaderPosition, LoaderSize},
    sink::LoadingSink,
    state::DEFAULT_MESSAGE,
    store::use_loading,
};

/// Options used for component-reported busy states: a small, silent corner badge.
pub const COMPONENT_LOADER_OPTIONS: LoaderOptions = LoaderOptions {
    size: LoaderSize::Small,
    position: LoaderPosition::TopRight,
    show_message: false,
    persistent: true,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Shown,
    Hidden,
}

/// Remembers the last busy value a component reported.
///
/// Starts at `false`, so a component that mounts idle issues nothing and one
/// that mounts busy issues a single `show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentLoading {
    busy: bool,
}

impl ComponentLoading {
    pub const fn is_busy(self) -> bool {
        self.busy
    }

    /// Feeds the latest busy value, forwarding a `show` or `hide` on change.
    pub fn update<S: LoadingSink>(
        &mut self,
        is_loading: bool,
        message: Option<&str>,
        sink: S,
    ) -> Option<Transition> {
        let transition = match (self.busy, is_loading) {
            (false, true) => {
                sink.show(message.unwrap_or(DEFAULT_MESSAGE), COMPONENT_LOADER_OPTIONS);
                Some(Transition::Shown)
            }
            (true, false) => {
                sink.hide();
                Some(Transition::Hidden)
            }
            _ => None,
        };
        self.busy = is_loading;
        transition
    }
}

/// Mirrors `is_loading` into the global loader.
///
/// Unmounting while still busy does not hide the loader; flip the signal to
/// `false` first.
///
/// # Panics
///
/// Panics when no loading store has been provided (see `provide_loading`).
pub fn use_component_loading(is_loading: impl Into<Signal<bool>>, message: Option<&str>) {
    let store = use_loading();
    let is_loading = is_loading.into();
    let message = message.map(str::to_owned);

    Effect::new(move |previous: Option<ComponentLoading>| {
        let mut tracker = previous.unwrap_or_default();
        if let Some(transition) = tracker.update(is_loading.get(), message.as_deref(), store) {
            tracing::debug!(?transition, message = ?message, "component loading changed");
        }
        tracker
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{sink::MockLoadingSink, state::LoadingState};
    use core::cell::RefCell;
    use mockall::{Sequence, predicate::eq};

    #[test]
    fn idle_mount_issues_nothing() {
        let mut sink = MockLoadingSink::new();
        sink.expect_show().never();
        sink.expect_hide().never();

        let mut tracker = ComponentLoading::default();
        assert_eq!(tracker.update(false, Some("Loading events"), &sink), None);
    }

    #[test]
    fn busy_mount_shows_once() {
        let mut sink = MockLoadingSink::new();
        sink.expect_show()
            .with(eq("Loading events"), eq(COMPONENT_LOADER_OPTIONS))
            .times(1)
            .return_const(());
        sink.expect_hide().never();

        let mut tracker = ComponentLoading::default();
        assert_eq!(
            tracker.update(true, Some("Loading events"), &sink),
            Some(Transition::Shown)
        );
        assert!(tracker.is_busy());
    }

    #[test]
    fn flip_flop_issues_one_show_then_one_hide() {
        let mut sink = MockLoadingSink::new();
        let mut seq = Sequence::new();
        sink.expect_show().times(1).in_sequence(&mut seq).return_const(());
        sink.expect_hide().times(1).in_sequence(&mut seq).return_const(());

        let mut tracker = ComponentLoading::default();
        for busy in [false, true, false] {
            tracker.update(busy, None, &sink);
        }
    }

    #[test]
    fn repeated_values_are_ignored() {
        let mut sink = MockLoadingSink::new();
        sink.expect_show().times(1).return_const(());
        sink.expect_hide().times(1).return_const(());

        let mut tracker = ComponentLoading::default();
        for busy in [true, true, true, false, false] {
            tracker.update(busy, None, &sink);
        }
    }

    #[test]
    fn missing_message_falls_back_to_default() {
        let state = RefCell::new(LoadingState::default());
        let mut tracker = ComponentLoading::default();

        tracker.update(true, None, &state);

        let state = state.borrow();
        assert_eq!(state.message, DEFAULT_MESSAGE);
        assert!(state.options.persistent);
        assert_eq!(state.options.position, LoaderPosition::TopRight);
    }
}
