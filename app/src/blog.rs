use icondata::{BsCalendar, BsClock};
use leptos::{
    html::{div, p},
    prelude::*,
    svg::svg,
};
use leptos_meta::{Title, TitleProps};
use leptos_router::components::{A, AProps};

use crate::{
    api::select_posts,
    components::{error_template, loader},
    types::Post,
};

fn icon(data: icondata::Icon) -> impl IntoView {
    svg()
        .attr("viewBox", data.view_box)
        .attr("innerHTML", data.data)
        .attr("style", "filter: brightness(0) invert(1);")
        .class("size-4")
}

fn card(post: Post) -> impl IntoView {
    div().class("flex flex-col p-3 text-left text-white rounded-lg transition-all duration-500 cursor-pointer break-inside-avoid bg-card hover:text-[#ffef5c]").child(
        A(AProps::builder()
            .href(format!("/blog/{}", post.slug))
            .children(ToChildren::to_children(move || {
                div().child((
                    div().class("flex flex-col gap-1 mb-4 font-medium").child((
                        p().class("text-base line-clamp-2").child(post.title.clone()),
                        p().class("italic text-xxs").child(post.summary.clone()),
                    )),
                    div().class("flex flex-row gap-3 justify-start items-center text-xxs").child((
                        div().class("flex flex-row gap-1 items-center").child((
                            icon(BsClock),
                            p().child(format!("{} min read", post.read_time)),
                        )),
                        div().class("flex flex-row gap-1 items-center").child((
                            icon(BsCalendar),
                            p().child(post.created_at.clone()),
                        )),
                    )),
                ))
            }))
            .build()),
    )
}

/// Published posts, newest first.
pub fn component() -> impl IntoView {
    let posts = Resource::new(|| (), |()| async move { select_posts().await });

    div().child((
        Title(TitleProps::builder().text("Blog \u{2013} Expo Stands").build()),
        Suspense(
            SuspenseProps::builder()
                .fallback(loader::spinner)
                .children(TypedChildren::to_children(move || {
                    move || {
                        posts.get().map(|result| match result {
                            Ok(posts) if posts.is_empty() => p()
                                .class("text-center text-gray-400")
                                .child("No posts yet.")
                                .into_any(),
                            Ok(posts) => div()
                                .class("gap-4 columns-1 sm:columns-2")
                                .child(posts.into_iter().map(card).collect_view())
                                .into_any(),
                            Err(error) => {
                                tracing::error!(%error, "posts unavailable");
                                error_template::page(error_template::AppError::from(&error)).into_any()
                            }
                        })
                    }
                }))
                .build(),
        ),
    ))
}
