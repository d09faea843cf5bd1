//! Display options for the global loader.
//!
//! `LoaderOptions` is the fully resolved value the store keeps. Callers usually
//! hand over a `LoaderOptionsPatch`, which only names the fields they care about;
//! the patch is always merged over `LoaderOptions::default()`, never over
//! whatever a previous `show` left behind.

/// Spinner size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoaderSize {
    Tiny,
    #[default]
    Small,
    Medium,
}

/// Where the loader is anchored on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoaderPosition {
    /// Full-screen overlay with the spinner centred.
    Center,
    #[default]
    TopRight,
    BottomRight,
    /// Rendered in the normal document flow.
    Inline,
}

impl LoaderPosition {
    /// `true` for positions rendered by the corner/inline badge rather than the overlay.
    pub const fn is_badge(self) -> bool {
        !matches!(self, Self::Center)
    }
}

/// Resolved loader options.
///
/// `persistent` is advisory. It is meant to keep the loader up across
/// navigation, but nothing reads it yet; it is carried so views and callers can
/// inspect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LoaderOptions {
    pub size: LoaderSize,
    pub position: LoaderPosition,
    pub show_message: bool,
    pub persistent: bool,
}

/// A partial set of loader options.
///
/// Unset fields fall back to `LoaderOptions::default()` when resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderOptionsPatch {
    pub size: Option<LoaderSize>,
    pub position: Option<LoaderPosition>,
    pub show_message: Option<bool>,
    pub persistent: Option<bool>,
}

impl LoaderOptionsPatch {
    #[must_use]
    pub const fn size(mut self, size: LoaderSize) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub const fn position(mut self, position: LoaderPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn show_message(mut self, show_message: bool) -> Self {
        self.show_message = Some(show_message);
        self
    }

    #[must_use]
    pub const fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    /// Merges the patch over the fixed defaults.
    #[must_use]
    pub fn resolve(self) -> LoaderOptions {
        let defaults = LoaderOptions::default();
        LoaderOptions {
            size: self.size.unwrap_or(defaults.size),
            position: self.position.unwrap_or(defaults.position),
            show_message: self.show_message.unwrap_or(defaults.show_message),
            persistent: self.persistent.unwrap_or(defaults.persistent),
        }
    }
}

impl From<LoaderOptions> for LoaderOptionsPatch {
    fn from(options: LoaderOptions) -> Self {
        Self {
            size: Some(options.size),
            position: Some(options.position),
            show_message: Some(options.show_message),
            persistent: Some(options.persistent),
        }
    }
}
