//! Product page for one exhibition-stand system.

use icondata::BsCheck2;
use leptos::{
    html::{a, div, h1, h2, img, li, p, ul},
    prelude::*,
    svg::svg,
};
use leptos_meta::{Title, TitleProps};
use leptos_router::hooks::use_params_map;

use crate::{
    api::select_stand,
    components::{error_template, loader},
    types::StandPage,
};

/// `From €1,250` style price label.
pub fn price_label(price_from: u32) -> String {
    let digits = price_from.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("From \u{20ac}{grouped}")
}

fn stand_view(stand: StandPage) -> impl IntoView {
    let StandPage {
        title,
        headline,
        body,
        features,
        gallery,
        price_from,
        ..
    } = stand;

    div().class("flex flex-col gap-10").child((
        Title(TitleProps::builder().text(format!("{title} \u{2013} Expo Stands")).build()),
        div().class("flex flex-col gap-4").child((
            h1().class("text-5xl font-extrabold leading-tight text-[#ffef5c]").child(title),
            p().class("max-w-2xl text-lg text-gray-300").child(headline),
            price_from.map(|price| p().class("text-xl font-semibold text-white").child(price_label(price))),
        )),
        div().class("max-w-3xl prose prose-p:text-gray-300 prose-strong:text-white prose-a:text-[#ffef5c]").inner_html(body),
        (!features.is_empty()).then(|| {
            div().class("flex flex-col gap-3").child((
                h2().class("text-2xl font-bold text-white").child("What's included"),
                ul().class("grid grid-cols-1 gap-2 sm:grid-cols-2").child(
                    features
                        .into_iter()
                        .map(|feature| {
                            li().class("flex flex-row gap-2 items-center text-gray-300").child((
                                svg()
                                    .attr("viewBox", BsCheck2.view_box)
                                    .attr("innerHTML", BsCheck2.data)
                                    .attr("style", "filter: brightness(0) invert(1);")
                                    .class("size-4"),
                                feature,
                            ))
                        })
                        .collect_view(),
                ),
            ))
        }),
        div().class("grid grid-cols-1 gap-4 sm:grid-cols-2").child(
            gallery
                .into_iter()
                .map(|src| img().src(src).alt("").class("object-cover w-full rounded-lg"))
                .collect_view(),
        ),
        a().href("/contact")
            .class("inline-flex items-center py-3 px-6 font-semibold transition-colors w-fit bg-[#ffef5c] text-[#1e1e1e] hover:bg-[#ffef5c]/90")
            .child("Request a quote"),
    ))
}

pub fn component() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.with(|params| params.get("slug").unwrap_or_default());

    let stand = Resource::new_blocking(slug, |slug| async move { select_stand(slug).await });

    Suspense(
        SuspenseProps::builder()
            .fallback(loader::spinner)
            .children(TypedChildren::to_children(move || {
                move || {
                    stand.get().map(|result| match result {
                        Ok(stand) => stand_view(stand).into_any(),
                        Err(error) => {
                            tracing::warn!(%error, "stand lookup failed");
                            error_template::page(error_template::AppError::from(&error)).into_any()
                        }
                    })
                }
            }))
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(price_label(950), "From \u{20ac}950");
        assert_eq!(price_label(1250), "From \u{20ac}1,250");
        assert_eq!(price_label(125_000), "From \u{20ac}125,000");
        assert_eq!(price_label(1_000_000), "From \u{20ac}1,000,000");
    }
}
