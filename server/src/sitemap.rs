use std::fmt::Write as _;

use app::types::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared_utils::{RetryConfig, retry_async};
use surrealdb::Surreal;
use surrealdb::engine::remote::http::Client;
use tracing::error;

/// Public origin used in sitemap URLs when `SITE_URL` is not set.
pub const DEFAULT_SITE_URL: &str = "https://expostands.com";

const STATIC_PAGES: [(&str, &str, &str); 4] = [
    ("/", "weekly", "1.0"),
    ("/blog", "daily", "0.8"),
    ("/events", "weekly", "0.8"),
    ("/contact", "monthly", "0.6"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct SlugRow {
    slug: String,
}

/// Slugs of every public page that has one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapSlugs {
    pub posts: Vec<String>,
    pub cities: Vec<String>,
    pub stands: Vec<String>,
}

/// Renders the sitemap XML for `base_url` (no trailing slash).
pub fn render(base_url: &str, slugs: &SitemapSlugs) -> Result<String, std::fmt::Error> {
    let mut sitemap = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, freq, priority) in STATIC_PAGES {
        writeln!(
            sitemap,
            "<url><loc>{base_url}{path}</loc><changefreq>{freq}</changefreq><priority>{priority}</priority></url>"
        )?;
    }

    let dynamic = [
        ("blog", &slugs.posts, "0.7"),
        ("cities", &slugs.cities, "0.9"),
        ("stands", &slugs.stands, "0.9"),
    ];
    for (prefix, entries, priority) in dynamic {
        for slug in entries {
            writeln!(
                sitemap,
                "<url><loc>{base_url}/{prefix}/{slug}</loc><changefreq>monthly</changefreq><priority>{priority}</priority></url>"
            )?;
        }
    }

    sitemap.push_str("</urlset>");
    Ok(sitemap)
}

async fn load_slugs(db: &Surreal<Client>) -> Result<SitemapSlugs, surrealdb::Error> {
    let mut query = retry_async("sitemap_query", RetryConfig::default(), || async {
        db.query(
            "SELECT slug FROM post WHERE is_published = true ORDER BY created_at DESC; \
             SELECT slug FROM city ORDER BY slug; \
             SELECT slug FROM stand ORDER BY slug",
        )
        .await
    })
    .await?;

    let slugs = |rows: Vec<SlugRow>| -> Vec<String> {
        rows.into_iter()
            .map(|row| row.slug)
            .filter(|slug| app::api::is_valid_slug(slug))
            .collect()
    };

    Ok(SitemapSlugs {
        posts: slugs(query.take(0)?),
        cities: slugs(query.take(1)?),
        stands: slugs(query.take(2)?),
    })
}

pub async fn sitemap_handler(State(state): State<AppState>, base_url: String) -> Response {
    let AppState { db, .. } = state;

    let sitemap = match load_slugs(db.as_ref()).await {
        Ok(slugs) => render(&base_url, &slugs).map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };

    match sitemap {
        Ok(body) => ([(header::CONTENT_TYPE, "application/xml")], body).into_response(),
        Err(err) => {
            error!(%err, "Failed to build sitemap");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build sitemap").into_response()
        }
    }
}
