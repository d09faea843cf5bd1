mod db;
mod redirect;
mod security;
mod sitemap;

use std::{sync::Arc, time::Duration};

use app::{component, shell, types::AppState};
use axum::{Router, extract::State, middleware, response::Json, routing::get};
use dotenvy::dotenv;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes as _, generate_route_list};
use leptos_config::get_configuration;
use serde_json::{Value, json};
use tower_http::compression::predicate::{NotForContentType, SizeAbove};
use tower_http::compression::{CompressionLayer, Predicate as _};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use db::{DbConfig, connect};
use redirect::redirect_www;
use security::{RateLimiter, limit_contact, security_headers};
use sitemap::{DEFAULT_SITE_URL, sitemap_handler};

/// Contact submissions allowed per client and window.
const CONTACT_LIMIT: usize = 5;
const CONTACT_WINDOW: Duration = Duration::from_secs(10 * 60);

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "site",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

const fn tracing_level() -> tracing::Level {
    if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing_level())
        .init();

    if dotenv().is_err() {
        tracing::warn!("There is no corresponding .env file");
    }

    let conf = match get_configuration(Some("Cargo.toml")) {
        Ok(conf) => conf,
        Err(err) => {
            tracing::error!("Failed to get configuration: {err}");
            return;
        }
    };

    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let pkg_dir = format!("{}/{}", leptos_options.site_root, leptos_options.site_pkg_dir);
    let routes = generate_route_list(component);

    let db = match connect(&DbConfig::from_env()).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("Failed to connect to SurrealDB: {err}");
            return;
        }
    };
    let app_state = AppState {
        db: Arc::new(db),
        leptos_options: Arc::new(leptos_options.clone()),
    };

    let site_url = std::env::var("SITE_URL")
        .ok()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_owned());
    let site_url = site_url.trim_end_matches('/').to_owned();

    let app = Router::new()
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .route("/health", get(health_handler))
        .route(
            "/sitemap.xml",
            get(move |state: State<AppState>| sitemap_handler(state, site_url.clone())),
        )
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(redirect_www))
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn_with_state(
                    RateLimiter::new(CONTACT_LIMIT, CONTACT_WINDOW),
                    limit_contact,
                )),
        )
        .layer(CompressionLayer::new().compress_when(
            NotForContentType::IMAGES.and(SizeAbove::new(1024)),
        ))
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .with_state(app_state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind tcp listener to {addr}: {err}");
            return;
        }
    };
    tracing::info!("Listening on http://{addr}");

    match axum::serve(listener, app.into_make_service()).await {
        Ok(()) => tracing::info!("Server shutdown gracefully"),
        Err(err) => tracing::error!("Failed to serve app: {err:?}"),
    }
}
