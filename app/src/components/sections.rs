//! Renders admin-managed page sections by kind.

use leptos::{
    html::{a, div, h1, h2, img, p, section},
    prelude::*,
};

use crate::types::{Section, SectionKind};

/// Sections sorted by `position`, with hero sections first.
pub fn ordered(mut sections: Vec<Section>) -> Vec<Section> {
    sections.sort_by_key(|section| (section.kind != SectionKind::Hero, section.position));
    sections
}

fn call_to_action(label: Option<String>, href: Option<String>) -> Option<impl IntoView> {
    let (label, href) = label.zip(href)?;
    Some(
        a().href(href)
            .class("inline-flex items-center py-3 px-6 mt-4 font-semibold transition-colors w-fit bg-[#ffef5c] text-[#1e1e1e] hover:bg-[#ffef5c]/90")
            .child(label),
    )
}

pub fn component(item: Section) -> AnyView {
    let Section {
        kind,
        heading,
        body,
        image,
        cta_label,
        cta_href,
        ..
    } = item;

    match kind {
        SectionKind::Hero => section()
            .class("flex flex-col gap-4 py-12")
            .child((
                h1().class("text-5xl font-extrabold leading-tight sm:text-6xl text-[#ffef5c]").child(heading),
                p().class("max-w-2xl text-lg text-gray-300").inner_html(body),
                image.map(|src| img().src(src).alt("").class("object-cover mt-6 w-full rounded-lg aspect-video")),
                call_to_action(cta_label, cta_href),
            ))
            .into_any(),
        SectionKind::Text => section()
            .class("flex flex-col gap-3 py-6")
            .child((
                h2().class("text-3xl font-bold text-white").child(heading),
                div().class("max-w-3xl prose prose-p:text-gray-300 prose-a:text-[#ffef5c] prose-strong:text-white").inner_html(body),
            ))
            .into_any(),
        SectionKind::Gallery => section()
            .class("flex flex-col gap-4 py-6")
            .child((
                h2().class("text-3xl font-bold text-white").child(heading),
                div()
                    .class("grid grid-cols-1 gap-4 sm:grid-cols-2")
                    .child(image.map(|src| img().src(src).alt("").class("object-cover w-full rounded-lg"))),
            ))
            .into_any(),
        SectionKind::CallToAction => section()
            .class("flex flex-col gap-2 items-start p-8 rounded-lg bg-[#2a2a2a]")
            .child((
                h2().class("text-2xl font-bold text-[#ffef5c]").child(heading),
                p().class("text-gray-300").child(body),
                call_to_action(cta_label, cta_href),
            ))
            .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: SectionKind, position: u32) -> Section {
        Section {
            page: "home".to_owned(),
            kind,
            heading: format!("{kind:?} {position}"),
            position,
            ..Section::default()
        }
    }

    #[test]
    fn hero_is_placed_first() {
        let ordered = ordered(vec![
            section(SectionKind::Text, 1),
            section(SectionKind::Hero, 5),
            section(SectionKind::CallToAction, 0),
        ]);

        let kinds: Vec<_> = ordered.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SectionKind::Hero, SectionKind::CallToAction, SectionKind::Text]
        );
    }

    #[test]
    fn order_is_stable_for_equal_positions() {
        let ordered = ordered(vec![section(SectionKind::Text, 2), section(SectionKind::Gallery, 2)]);
        assert_eq!(ordered[0].kind, SectionKind::Text);
        assert_eq!(ordered[1].kind, SectionKind::Gallery);
    }
}
