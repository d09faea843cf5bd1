//! Landing page. Everything on it is an admin-managed section of the `home`
//! page.
//!
//! While the sections are in flight the page reports itself busy to the
//! shared loader (a small corner badge) instead of blanking the layout.

use leptos::{html::div, prelude::*};
use leptos_meta::{Title, TitleProps};

use crate::{
    SITE_TITLE,
    api::select_sections,
    components::{error_template, sections},
    loading::use_component_loading,
};

pub const HOME_PAGE: &str = "home";

pub fn component() -> impl IntoView {
    let home_sections = Resource::new_blocking(
        || (),
        move |()| async move { select_sections(HOME_PAGE.to_owned()).await },
    );

    use_component_loading(
        Signal::derive(move || home_sections.get().is_none()),
        Some("Loading stands..."),
    );

    div().child((
        Title(TitleProps::builder().text(SITE_TITLE).build()),
        Suspense(
            SuspenseProps::builder()
                .fallback(|| ())
                .children(TypedChildren::to_children(move || {
                    move || {
                        home_sections.get().map(|result| match result {
                            Ok(found) => div()
                                .class("flex flex-col gap-12")
                                .child(
                                    sections::ordered(found)
                                        .into_iter()
                                        .map(sections::component)
                                        .collect_view(),
                                )
                                .into_any(),
                            Err(error) => {
                                tracing::error!(%error, "home sections unavailable");
                                error_template::page(error_template::AppError::from(&error)).into_any()
                            }
                        })
                    }
                }))
                .build(),
        ),
    ))
}
