//! Single blog post page. The body is stored as HTML and injected as-is.

use leptos::html::{article, div, img, p, span};
use leptos::prelude::*;
use leptos_meta::{Title, TitleProps};
use leptos_router::hooks::use_params_map;

use crate::{
    api::select_post,
    components::{error_template, loader},
    types::Post,
};

fn article_view(post: Post) -> impl IntoView {
    let Post {
        title,
        body,
        tags,
        author,
        header_image,
        read_time,
        created_at,
        ..
    } = post;

    div().class("flex flex-col items-center font-mono").child((
        header_image.map(|src| {
            img()
                .alt(title.clone())
                .class("object-contain self-center mb-6 h-full rounded-lg w-fit aspect-auto")
                .src(src)
        }),
        Title(TitleProps::builder().text(format!("{title} \u{2013} Expo Stands")).build()),
        article().child((
            div().class("flex flex-col gap-4 mx-auto max-w-3xl").child((
                p().class("text-4xl font-semibold").child(title),
                div().class("flex flex-wrap gap-3 justify-start items-center text-sm text-muted-foreground").child((
                    (!author.is_empty()).then(|| p().child(("by ", span().class("ml-1 font-semibold").child(author)))),
                    p().child(created_at),
                    p().child(format!("{read_time} min read")),
                    tags.into_iter()
                        .map(|tag| span().class("py-0.5 px-2 text-xs rounded-full bg-[#2a2a2a] text-[#ffef5c]").child(tag))
                        .collect_view(),
                )),
            )),
            div().class("my-6 mx-auto max-w-3xl prose prose-h3:text-white prose-h4:text-white prose-strong:text-white prose-li:marker:text-white prose-li:text-white prose-ol:text-white prose-h1:text-white prose-h1:text-3xl prose-h2:text-white prose-h2:text-2xl prose-ul:text-white prose-p:text-white prose-a:text-[#ffef5c]")
                .inner_html(body),
        )),
    ))
}

pub fn component() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.with(|params| params.get("slug").unwrap_or_default());

    let post = Resource::new_blocking(slug, |slug| async move { select_post(slug).await });

    Suspense(
        SuspenseProps::builder()
            .fallback(loader::spinner)
            .children(TypedChildren::to_children(move || {
                move || {
                    post.get().map(|result| match result {
                        Ok(post) => article_view(post).into_any(),
                        Err(error) => {
                            tracing::warn!(%error, "post lookup failed");
                            error_template::page(error_template::AppError::from(&error)).into_any()
                        }
                    })
                }
            }))
            .build(),
    )
}
