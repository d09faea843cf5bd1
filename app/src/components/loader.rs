//! Loader views: an inline spinner for `Suspense` fallbacks, plus the overlay
//! and badge that render the global loading store.
//!
//! The views are pure functions of a `LoaderFrame`. Showing and hiding only
//! swaps transition classes, so the fade never delays the logical state.

use leptos::{
    html::{div, p, span},
    prelude::*,
};

use crate::loading::{DEFAULT_MESSAGE, LoaderPosition, LoaderSize, LoadingState, use_loading};

/// Everything a loader view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderFrame {
    pub visible: bool,
    pub message: String,
    pub size: LoaderSize,
    pub position: LoaderPosition,
    pub show_message: bool,
}

impl LoaderFrame {
    pub fn from_state(state: &LoadingState) -> Self {
        Self {
            visible: state.is_loading,
            message: state.message.clone(),
            size: state.options.size,
            position: state.options.position,
            show_message: state.options.show_message,
        }
    }

    /// The same frame, forced hidden unless `keep` holds.
    #[must_use]
    pub fn visible_if(mut self, keep: bool) -> Self {
        self.visible &= keep;
        self
    }
}

pub const fn size_classes(size: LoaderSize) -> &'static str {
    match size {
        LoaderSize::Tiny => "size-3 border-2",
        LoaderSize::Small => "size-5 border-2",
        LoaderSize::Medium => "size-10 border-4",
    }
}

pub const fn badge_position_classes(position: LoaderPosition) -> &'static str {
    match position {
        LoaderPosition::TopRight => "fixed top-24 right-4 z-50",
        LoaderPosition::BottomRight => "fixed right-4 bottom-16 z-50",
        LoaderPosition::Inline => "inline-flex",
        LoaderPosition::Center => "fixed inset-0 z-50 justify-center",
    }
}

pub const fn visibility_classes(visible: bool) -> &'static str {
    if visible {
        "opacity-100 scale-100"
    } else {
        "opacity-0 scale-95 pointer-events-none"
    }
}

fn ring_classes(size: LoaderSize) -> String {
    format!(
        "inline-block rounded-full animate-spin border-[#ffef5c] border-t-transparent {}",
        size_classes(size)
    )
}

/// Inline spinner with the default message, sized to fill its container.
pub fn spinner() -> impl IntoView {
    div()
        .class("flex absolute inset-0 flex-col gap-1 justify-center items-center m-auto")
        .child((
            span().class(ring_classes(LoaderSize::Medium)),
            p().class("text-sm italic text-muted-foreground")
                .child(DEFAULT_MESSAGE),
        ))
}

/// Full-screen overlay with a centred spinner.
pub fn overlay(frame: Signal<LoaderFrame>) -> impl IntoView {
    view! {
        <div
            role="status"
            aria-live="polite"
            aria-hidden=move || (!frame.with(|f| f.visible)).to_string()
            class=move || {
                format!(
                    "flex fixed inset-0 z-50 justify-center items-center transition-all duration-300 bg-[#1e1e1e]/70 backdrop-blur-sm {}",
                    visibility_classes(frame.with(|f| f.visible)),
                )
            }
        >
            <div class="flex flex-col gap-3 items-center">
                <span class=move || ring_classes(frame.with(|f| f.size))></span>
                <Show when=move || frame.with(|f| f.show_message)>
                    <p class="text-sm italic text-gray-300">{move || frame.with(|f| f.message.clone())}</p>
                </Show>
            </div>
        </div>
    }
}

/// Small pill anchored to a corner, or placed inline.
pub fn badge(frame: Signal<LoaderFrame>) -> impl IntoView {
    view! {
        <div
            role="status"
            aria-live="polite"
            aria-hidden=move || (!frame.with(|f| f.visible)).to_string()
            class=move || {
                frame.with(|f| {
                    format!(
                        "flex gap-2 items-center py-1 px-3 rounded-full shadow-lg transition-all duration-300 bg-[#2a2a2a]/90 {} {}",
                        badge_position_classes(f.position),
                        visibility_classes(f.visible),
                    )
                })
            }
        >
            <span class=move || ring_classes(frame.with(|f| f.size))></span>
            <Show when=move || frame.with(|f| f.show_message)>
                <span class="text-xs text-gray-300">{move || frame.with(|f| f.message.clone())}</span>
            </Show>
        </div>
    }
}

/// Renders the shared loading store: `Center` goes to the overlay, every other
/// position to the badge. Both stay mounted so either can fade out.
pub fn global() -> impl IntoView {
    let store = use_loading();
    let frame = Memo::new(move |_| LoaderFrame::from_state(&store.snapshot()));

    let overlay_frame = Signal::derive(move || {
        let frame = frame.get();
        let centred = !frame.position.is_badge();
        frame.visible_if(centred)
    });
    let badge_frame = Signal::derive(move || {
        let frame = frame.get();
        let corner = frame.position.is_badge();
        frame.visible_if(corner)
    });

    (overlay(overlay_frame), badge(badge_frame))
}
