//! Error page rendered by route fallbacks and error boundaries.
//!
//! On the server the first `AppError` also decides the HTTP status of the
//! response.

use http::status::StatusCode;
use leptos::{
    html::{div, h1, p},
    prelude::*,
};
use leptos_router::components::{A, AProps};
use thiserror::Error;

use crate::api::{INVALID_SLUG_PREFIX, NOT_FOUND_PREFIX};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
    /// The content backend could not serve the page.
    #[error("Content Unavailable")]
    ContentUnavailable,
}

impl AppError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ContentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[allow(deprecated)]
impl From<&ServerFnError> for AppError {
    /// Lookups that found nothing (or got a malformed slug) are client errors.
    /// Everything else, transport failures included, is the backend's.
    fn from(error: &ServerFnError) -> Self {
        match error {
            ServerFnError::ServerError(message)
                if message.starts_with(NOT_FOUND_PREFIX) || message.starts_with(INVALID_SLUG_PREFIX) =>
            {
                Self::NotFound
            }
            _ => Self::ContentUnavailable,
        }
    }
}

/// Error page for a single failure raised inside a page.
pub fn page(error: AppError) -> impl IntoView {
    let mut errors = Errors::default();
    errors.insert_with_default_key(error);
    component(Some(errors), None)
}

/// Renders every `AppError` found in `outside_errors` (SSR) or `errors`
/// (client error boundaries).
///
/// # Panics
///
/// Panics when neither source of errors is given.
pub fn component(
    outside_errors: Option<Errors>,
    errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = outside_errors.map_or_else(
        || errors.unwrap_or_else(|| panic!("No Errors found and we expected errors!")),
        RwSignal::new,
    );
    let errors: Vec<AppError> = errors
        .get_untracked()
        .into_iter()
        .filter_map(|(_key, value)| value.downcast_ref::<AppError>().cloned())
        .collect();

    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let (Some(response), Some(first)) = (use_context::<ResponseOptions>(), errors.first()) {
            response.set_status(first.status_code());
        }
    }

    div().class("grid place-content-center px-4 h-full antialiased").child((
        h1().class("mb-6 text-center").child(if errors.len() > 1 { "Errors" } else { "Error" }),
        For(
            ForProps::builder()
                .each(move || errors.clone().into_iter().enumerate())
                .key(|(index, _error)| *index)
                .children(|(_, error)| {
                    div().class("flex flex-col gap-1 justify-center items-center").child((
                        h1().class("text-xl tracking-widest text-gray-400 uppercase")
                            .child(format!("{}| {error}", error.status_code())),
                        div().class("flex gap-1 justify-center items-center mt-6 text-center duration-200 hover:text-[#ffef5c]").child(
                            A(AProps::builder()
                                .href("/")
                                .children(ToChildren::to_children(|| p().child("Back to the homepage")))
                                .build()),
                        ),
                    ))
                })
                .build(),
        ),
    ))
}
