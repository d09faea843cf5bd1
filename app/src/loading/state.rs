//! The plain loading state owned by the store.
//!
//! Kept free of any reactive types so the last-write-wins rules can be tested
//! without a Leptos runtime.

use super::options::LoaderOptions;

/// Message used when `show` is called without one.
pub const DEFAULT_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub message: String,
    pub options: LoaderOptions,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading: false,
            message: DEFAULT_MESSAGE.to_owned(),
            options: LoaderOptions::default(),
        }
    }
}

impl LoadingState {
    /// Marks the state busy, replacing message and options wholesale.
    ///
    /// A second `show` while already busy overwrites; nothing is stacked.
    pub fn show(&mut self, message: &str, options: LoaderOptions) {
        self.is_loading = true;
        message.clone_into(&mut self.message);
        self.options = options;
    }

    /// Clears the busy flag. Returns `false` when it was already clear.
    ///
    /// Message and options are left as they were so a fading view can keep
    /// rendering them.
    pub fn hide(&mut self) -> bool {
        let was_loading = self.is_loading;
        self.is_loading = false;
        was_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::options::{LoaderPosition, LoaderSize};

    fn centred() -> LoaderOptions {
        LoaderOptions {
            position: LoaderPosition::Center,
            size: LoaderSize::Medium,
            ..LoaderOptions::default()
        }
    }

    #[test]
    fn starts_idle_with_default_message() {
        let state = LoadingState::default();
        assert!(!state.is_loading);
        assert_eq!(state.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn visibility_follows_the_last_call_only() {
        let mut state = LoadingState::default();

        state.show("a", LoaderOptions::default());
        state.show("b", LoaderOptions::default());
        state.show("c", LoaderOptions::default());
        state.hide();
        assert!(!state.is_loading, "three shows are undone by a single hide");

        state.hide();
        state.hide();
        state.show("d", LoaderOptions::default());
        assert!(state.is_loading, "repeated hides do not outweigh a later show");
    }

    #[test]
    fn second_show_overwrites_message_and_options() {
        let mut state = LoadingState::default();
        state.show("Loading events", centred());
        state.show("Saving", LoaderOptions::default());

        assert_eq!(state.message, "Saving");
        assert_eq!(state.options, LoaderOptions::default());
    }

    #[test]
    fn hide_when_hidden_is_a_no_op() {
        let mut state = LoadingState::default();
        let before = state.clone();

        assert!(!state.hide());
        assert_eq!(state, before);
    }

    #[test]
    fn hide_keeps_last_message_for_fade_out() {
        let mut state = LoadingState::default();
        state.show("Loading city", centred());

        assert!(state.hide());
        assert_eq!(state.message, "Loading city");
        assert_eq!(state.options, centred());
    }
}
