use leptos::{
    html::{div, h1, img, p},
    prelude::*,
};
use leptos_meta::{Title, TitleProps};
use leptos_router::hooks::use_params_map;

use crate::{
    api::select_city,
    components::{error_template, sections},
    loading::use_component_loading,
    types::CityPage,
};

fn city_view(city: CityPage) -> impl IntoView {
    let CityPage {
        name,
        headline,
        intro,
        hero_image,
        sections: city_sections,
        ..
    } = city;

    div().class("flex flex-col gap-10").child((
        Title(TitleProps::builder().text(format!("Exhibition stands in {name} \u{2013} Expo Stands")).build()),
        div().class("flex flex-col gap-4").child((
            p().class("text-sm tracking-widest text-gray-400 uppercase").child(name),
            h1().class("text-5xl font-extrabold leading-tight text-[#ffef5c]").child(headline),
            (!intro.is_empty()).then(|| p().class("max-w-2xl text-lg text-gray-300").child(intro)),
        )),
        hero_image.map(|src| img().src(src).alt("").class("object-cover w-full rounded-lg aspect-video")),
        sections::ordered(city_sections)
            .into_iter()
            .map(sections::component)
            .collect_view(),
    ))
}

/// Whether the city on screen (if any) is not the one the route asks for.
fn is_stale(loaded: Option<&str>, requested: &str) -> bool {
    loaded != Some(requested)
}

/// Landing page for one city we build stands in.
pub fn component() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.with(|params| params.get("slug").unwrap_or_default());

    // Keyed by slug so navigating between cities reports busy while the
    // previous city is still on screen.
    let city = Resource::new_blocking(slug, |slug| async move {
        let result = select_city(slug.clone()).await;
        (slug, result)
    });

    use_component_loading(
        Signal::derive(move || {
            let requested = slug();
            city.with(|loaded| is_stale(loaded.as_ref().map(|(slug, _)| slug.as_str()), &requested))
        }),
        Some("Loading city..."),
    );

    Suspense(
        SuspenseProps::builder()
            .fallback(|| ())
            .children(TypedChildren::to_children(move || {
                move || {
                    city.get().map(|(_, result)| match result {
                        Ok(city) => city_view(city).into_any(),
                        Err(error) => {
                            tracing::warn!(%error, "city lookup failed");
                            error_template::page(error_template::AppError::from(&error)).into_any()
                        }
                    })
                }
            }))
            .build(),
    )
}
