use leptos::{
    html::{a, div, span},
    prelude::*,
};

/// Outbound social links as `(href, aria label, glyph)`.
const SOCIAL_LINKS: [(&str, &str, &str); 3] = [
    ("https://www.linkedin.com/company/expo-stands", "LinkedIn", "in"),
    ("https://www.instagram.com/expo.stands", "Instagram", "IG"),
    ("https://www.youtube.com/@expostands", "YouTube", "YT"),
];

pub fn component() -> impl IntoView {
    div().class("flex flex-row gap-3 items-center h-10").child(
        SOCIAL_LINKS
            .into_iter()
            .map(|(href, label, glyph)| {
                a().href(href)
                    .rel("noopener noreferrer")
                    .target("_blank")
                    .aria_label(label)
                    .class("transition-all text-white duration-500 size-6 hover:text-[#ffef5c]")
                    .child(span().class("text-white size-6").child(glyph))
            })
            .collect_view(),
    )
}
