//! Upcoming trade fairs we exhibit at.
//!
//! Fetched on the client only, behind the full-screen loader with a message.
//! Refreshing goes through the same loader.

use leptos::{
    ev,
    html::{a, button, div, h2, p, span},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};

use crate::{
    api::select_events,
    components::error_template,
    loading::{LoaderOptionsPatch, LoaderPosition, use_data_loading},
    types::{Event, format_display_date},
};

pub const EVENTS_MESSAGE: &str = "Loading events...";

/// `Mar 7, 2026` or `Mar 7, 2026 \u{2013} Mar 9, 2026`. Raw values pass
/// through when they are not RFC 3339.
pub fn date_range(event: &Event) -> String {
    let display = |raw: &str| format_display_date(raw).unwrap_or_else(|_| raw.to_owned());
    let start = display(&event.starts_at);
    match event.ends_at.as_deref().map(display) {
        Some(end) if end != start => format!("{start} \u{2013} {end}"),
        _ => start,
    }
}

fn event_card(event: Event) -> impl IntoView {
    let dates = date_range(&event);
    let Event {
        title,
        summary,
        venue,
        city,
        url,
        ..
    } = event;

    div().class("flex flex-col gap-2 p-4 rounded-lg bg-card").child((
        span().class("text-xs tracking-widest uppercase text-[#ffef5c]").child(dates),
        h2().class("text-xl font-semibold text-white").child(title),
        p().class("text-sm text-gray-400").child(format!("{venue}, {city}")),
        (!summary.is_empty()).then(|| p().class("text-sm text-gray-300").child(summary)),
        url.map(|href| {
            a().href(href)
                .target("_blank")
                .rel("noopener noreferrer")
                .class("text-sm hover:underline text-[#ffef5c]")
                .child("Event website")
        }),
    ))
}

pub fn component() -> impl IntoView {
    let data_loading = use_data_loading();
    let events = LocalResource::new(move || {
        data_loading.fetch_with_loading(
            select_events,
            Some(EVENTS_MESSAGE),
            LoaderOptionsPatch::default()
                .position(LoaderPosition::Center)
                .show_message(true),
        )
    });

    div().class("flex flex-col gap-6").child((
        Title(TitleProps::builder().text("Events \u{2013} Expo Stands").build()),
        div().class("flex flex-row justify-between items-center").child((
            h2().class("text-3xl font-bold text-[#ffef5c]").child("Upcoming events"),
            button()
                .class("py-1 px-3 text-sm rounded-full border transition-colors border-[#ffef5c] text-[#ffef5c] hover:bg-[#ffef5c]/10")
                .on(ev::click, move |_| events.refetch())
                .child("Refresh"),
        )),
        Suspense(
            SuspenseProps::builder()
                .fallback(|| ())
                .children(TypedChildren::to_children(move || {
                    move || {
                        events.get().map(|result| match result {
                            Ok(events) if events.is_empty() => p()
                                .class("text-gray-400")
                                .child("No upcoming events. Check back soon.")
                                .into_any(),
                            Ok(events) => div()
                                .class("grid grid-cols-1 gap-4 md:grid-cols-2")
                                .child(events.into_iter().map(event_card).collect_view())
                                .into_any(),
                            Err(error) => {
                                tracing::error!(%error, "events unavailable");
                                error_template::page(error_template::AppError::from(&error)).into_any()
                            }
                        })
                    }
                }))
                .build(),
        ),
    ))
}
