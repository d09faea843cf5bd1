//! The one-time full-page splash shown during first paint.
//!
//! The splash goes `Init -> Waiting -> Hidden` and never comes back. It hides
//! once both the page `load` signal has arrived and the minimum display time
//! has passed, or unconditionally when the fallback timer fires, whichever is
//! first.

use core::time::Duration;

use leptos::{ev, prelude::*};

use super::error::LoadingError;

pub const DEFAULT_MIN_DISPLAY: Duration = Duration::from_millis(1200);
pub const DEFAULT_FALLBACK: Duration = Duration::from_millis(3000);

/// Id of the static, pre-hydration loader markup emitted by the shell.
pub const STATIC_LOADER_ID: &str = "static-loader";
/// Class added to `<body>` once the application has taken over.
pub const READY_CLASS: &str = "app-ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialLoadTimings {
    min_display: Duration,
    fallback: Duration,
}

impl Default for InitialLoadTimings {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISPLAY, DEFAULT_FALLBACK)
    }
}

impl InitialLoadTimings {
    /// A fallback shorter than the minimum display is raised to match it.
    pub fn new(min_display: Duration, fallback: Duration) -> Self {
        Self {
            min_display,
            fallback: fallback.max(min_display),
        }
    }

    pub const fn min_display(&self) -> Duration {
        self.min_display
    }

    pub const fn fallback(&self) -> Duration {
        self.fallback
    }

    /// Time since mount at which the splash disappears, given when (if ever)
    /// the page reported itself loaded.
    pub fn hide_at(&self, loaded_at: Option<Duration>) -> Duration {
        loaded_at.map_or(self.fallback, |loaded_at| {
            loaded_at.max(self.min_display).min(self.fallback)
        })
    }

    /// Feeds the timer and load events through an `InitialLoad` in time order
    /// and returns when it hid. Agrees with `hide_at`.
    pub fn replay(&self, loaded_at: Option<Duration>) -> Duration {
        let mut events = vec![
            (self.min_display, InitialLoadEvent::MinimumElapsed),
            (self.fallback, InitialLoadEvent::FallbackElapsed),
        ];
        if let Some(loaded_at) = loaded_at {
            events.push((loaded_at, InitialLoadEvent::PageLoaded));
        }
        events.sort_by_key(|(at, _)| *at);

        let mut machine = InitialLoad::new();
        events
            .into_iter()
            .find_map(|(at, event)| machine.handle(event).then_some(at))
            .unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialLoadPhase {
    /// Mounted; waiting for the page to report it has loaded.
    Init,
    /// Page loaded; holding the splash until the minimum display time passes.
    Waiting,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialLoadEvent {
    PageLoaded,
    MinimumElapsed,
    FallbackElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialLoad {
    phase: InitialLoadPhase,
    minimum_elapsed: bool,
}

impl Default for InitialLoad {
    fn default() -> Self {
        Self::new()
    }
}

impl InitialLoad {
    pub const fn new() -> Self {
        Self {
            phase: InitialLoadPhase::Init,
            minimum_elapsed: false,
        }
    }

    pub const fn phase(&self) -> InitialLoadPhase {
        self.phase
    }

    pub const fn is_visible(&self) -> bool {
        !matches!(self.phase, InitialLoadPhase::Hidden)
    }

    /// Applies an event. Returns `true` only for the event that hides the splash.
    pub fn handle(&mut self, event: InitialLoadEvent) -> bool {
        use InitialLoadEvent::{FallbackElapsed, MinimumElapsed, PageLoaded};
        use InitialLoadPhase::{Hidden, Init, Waiting};

        let next = match (self.phase, event) {
            (Hidden, _) => return false,
            (_, FallbackElapsed) => Hidden,
            (Init, PageLoaded) if self.minimum_elapsed => Hidden,
            (Init, PageLoaded) => Waiting,
            (Init, MinimumElapsed) => {
                self.minimum_elapsed = true;
                Init
            }
            (Waiting, MinimumElapsed) => Hidden,
            (Waiting, PageLoaded) => Waiting,
        };
        self.phase = next;
        next == Hidden
    }
}

/// Read-only view of the splash flag.
#[derive(Debug, Clone, Copy)]
pub struct InitialLoading {
    machine: RwSignal<InitialLoad>,
}

impl InitialLoading {
    fn new() -> Self {
        Self {
            machine: RwSignal::new(InitialLoad::new()),
        }
    }

    pub fn is_initial_loading(&self) -> bool {
        self.machine.with(InitialLoad::is_visible)
    }

    pub fn phase(&self) -> InitialLoadPhase {
        self.machine.with(InitialLoad::phase)
    }

    fn dispatch(self, event: InitialLoadEvent) {
        // Timers can outlive the shell; a disposed signal just drops the event.
        let _ = self.machine.try_update(|machine| {
            if machine.handle(event) {
                tracing::debug!(?event, "initial loader hidden");
            }
        });
    }

    /// Marks the document interactive and wires the timers and load listener.
    fn start(self, timings: InitialLoadTimings) {
        // Effects only run in the browser, so none of this happens during SSR.
        Effect::new(move |_| {
            mark_document_interactive();

            set_timeout(
                move || self.dispatch(InitialLoadEvent::MinimumElapsed),
                timings.min_display(),
            );
            set_timeout(
                move || self.dispatch(InitialLoadEvent::FallbackElapsed),
                timings.fallback(),
            );

            if is_document_complete(&document().ready_state()) {
                self.dispatch(InitialLoadEvent::PageLoaded);
            } else {
                // `load` fires at most once and later dispatches are no-ops, so
                // the handle is never removed.
                let _handle = window_event_listener(ev::load, move |_| {
                    self.dispatch(InitialLoadEvent::PageLoaded);
                });
            }
        });
    }
}

/// Sets up the splash flag and, on the client, its timers and load listener.
///
/// Reuses an `InitialLoading` already present in context.
pub fn provide_initial_loading(timings: InitialLoadTimings) -> InitialLoading {
    if let Some(existing) = use_context::<InitialLoading>() {
        tracing::warn!("initial loading already provided; reusing it");
        return existing;
    }

    let initial = InitialLoading::new();
    provide_context(initial);
    initial.start(timings);
    initial
}

pub fn try_use_initial_loading() -> Result<InitialLoading, LoadingError> {
    use_context::<InitialLoading>().ok_or(LoadingError::MissingProvider {
        hook: "use_initial_loading",
        provider: "provide_initial_loading",
    })
}

/// # Panics
///
/// Panics when called outside a tree set up with `provide_initial_loading`.
pub fn use_initial_loading() -> InitialLoading {
    try_use_initial_loading().unwrap_or_else(|err| panic!("{err}"))
}

/// `document.readyState` once every subresource has loaded.
const READY_STATE_COMPLETE: &str = "complete";

fn is_document_complete(ready_state: &str) -> bool {
    ready_state == READY_STATE_COMPLETE
}

/// Removes the static pre-hydration loader and unlocks page scrolling.
fn mark_document_interactive() {
    let document = document();
    if let Some(static_loader) = document.get_element_by_id(STATIC_LOADER_ID) {
        static_loader.remove();
    }
    if let Some(body) = document.body() {
        let _ = body.style().remove_property("overflow");
        let _ = body.class_list().add_1(READY_CLASS);
    }
}
