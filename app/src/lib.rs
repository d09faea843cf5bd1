// Core application modules and components
use crate::{
    components::{error_template, header, icons, loader, splash},
    loading::{InitialLoadTimings, initial::STATIC_LOADER_ID, provide_initial_loading, provide_loading},
};
use chrono::{Datelike as _, Utc};
use leptos::{
    html::{a, body, div, footer, head, html, meta, p, span, style},
    prelude::*,
};
use leptos_meta::{MetaTags, Stylesheet, StylesheetProps, Title, TitleProps, provide_meta_context};
use leptos_router::{
    ParamSegment, SsrMode, StaticSegment,
    components::{FlatRoutes, Route, Router},
};

pub mod api;
mod blog;
mod city;
pub mod components;
mod contact;
mod events;
mod home;
pub mod loading;
mod post;
mod stand;
pub mod types;

pub const SITE_TITLE: &str = "Expo Stands \u{2013} Exhibition Stands & Trade Fair Design";

/// Inline rules for the pre-hydration loader. The stylesheet may still be in
/// flight when it first paints.
const STATIC_LOADER_CSS: &str = "\
#static-loader{position:fixed;inset:0;z-index:200;display:flex;align-items:center;justify-content:center;background:#1e1e1e}\
#static-loader span{width:3rem;height:3rem;border:4px solid #ffef5c;border-top-color:transparent;border-radius:9999px;animation:static-spin 1s linear infinite}\
@keyframes static-spin{to{transform:rotate(360deg)}}";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let html_comp = html().lang("en").child((
        head().child((
            meta().charset("utf-8"),
            meta()
                .name("viewport")
                .content("width=device-width, initial-scale=1"),
            HydrationScripts(HydrationScriptsProps::builder().options(options).build()),
            MetaTags(),
            style().child(STATIC_LOADER_CSS),
            Stylesheet(
                StylesheetProps::builder()
                    .id("leptos")
                    .href("/pkg/site.css")
                    .build(),
            ),
            Title(TitleProps::builder().text(SITE_TITLE).build()),
        )),
        // Scrolling stays locked until the initial loader releases the page.
        // The static loader sits after the app root so hydration never walks it.
        body()
            .class("bg-[#1e1e1e]")
            .style("overflow: hidden")
            .child((self::component, static_loader())),
    ));

    view! {
        <!DOCTYPE html>
        {html_comp}
    }
}

fn static_loader() -> impl IntoView {
    div()
        .id(STATIC_LOADER_ID)
        .attr("role", "status")
        .aria_label("Loading")
        .child(span())
}

#[must_use]
pub fn component() -> impl IntoView {
    provide_loading();
    provide_initial_loading(InitialLoadTimings::default());

    view! {
        <Router>
            {splash::component}
            {loader::global}
            <div class="overflow-auto text-white font-poppins">
                {header::component}
                <main class="container flex flex-col gap-8 px-4 pt-10 pb-14 mx-auto mt-16 max-w-5xl md:px-0">
                    <FlatRoutes fallback=|| {
                        let mut outside_errors = Errors::default();
                        outside_errors.insert_with_default_key(error_template::AppError::NotFound);
                        error_template::component(Some(outside_errors), None)
                    }>
                        <Route path=StaticSegment("") view=home::component ssr=SsrMode::InOrder/>
                        <Route path=StaticSegment("blog") view=blog::component/>
                        <Route path=(StaticSegment("blog"), ParamSegment("slug")) view=post::component ssr=SsrMode::Async/>
                        <Route path=StaticSegment("events") view=events::component/>
                        <Route path=(StaticSegment("cities"), ParamSegment("slug")) view=city::component ssr=SsrMode::Async/>
                        <Route path=(StaticSegment("stands"), ParamSegment("slug")) view=stand::component ssr=SsrMode::Async/>
                        <Route path=StaticSegment("contact") view=contact::component/>
                    </FlatRoutes>
                </main>
                {footer_component()}
            </div>
        </Router>
    }
}

fn footer_component() -> impl IntoView {
    footer()
        .class("fixed right-0 bottom-0 left-0 z-10 py-2 text-center md:py-4 bg-[#1e1e1e]/80 backdrop-blur-md")
        .child(
            div().class("flex flex-col gap-1 justify-center items-center").child((
                p().class("text-gray-400").child((
                    a()
                        .href("/contact")
                        .class("hover:underline text-[#ffef5c]")
                        .child("Expo Stands"),
                    format!(" \u{a9} {}", Utc::now().year()),
                )),
                div().class("block md:hidden").child(icons::component),
            )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_creation() {
        let options = LeptosOptions::builder().output_name("site").build();
        let shell_view = shell(options);
        drop(shell_view);
    }

    #[test]
    fn test_component_function_signatures() {
        let _shell_fn: fn(LeptosOptions) -> _ = shell;
        let _component_fn: fn() -> _ = component;
    }

    #[test]
    fn static_loader_rules_target_its_id() {
        assert!(STATIC_LOADER_CSS.starts_with(&format!("#{STATIC_LOADER_ID}{{")));
        assert!(STATIC_LOADER_CSS.contains("@keyframes static-spin"));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_server_functions_integration() {
        use crate::api::*;

        let _sections_fn: fn(String) -> _ = select_sections;
        let _posts_fn: fn() -> _ = select_posts;
        let _post_fn: fn(String) -> _ = select_post;
        let _events_fn: fn() -> _ = select_events;
        let _city_fn: fn(String) -> _ = select_city;
        let _stand_fn: fn(String) -> _ = select_stand;
        let _contact_fn: fn(ContactRequest) -> _ = submit_contact;
    }
}
