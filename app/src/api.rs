//! Server functions backing the public pages.
//!
//! Every read goes through `retry_async` so a briefly unavailable SurrealDB
//! instance does not surface as a failed page. Slugs are validated before
//! they reach a query, and all values are passed as bound parameters.

#![allow(deprecated)]

use leptos::prelude::{ServerFnError, server};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CityPage, Event, Post, Section, StandPage};

#[cfg(feature = "ssr")]
use leptos::server_fn::error::NoCustomError;
#[cfg(feature = "ssr")]
use shared_utils::{RetryConfig, retry_async};

const MAX_SLUG_LEN: usize = 200;
const MAX_NAME_LEN: usize = 100;
const MAX_COMPANY_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;
const MAX_MESSAGE_LEN: usize = 5000;

/// `true` for 1 to 200 ASCII letters, digits, `-` or `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(feature = "ssr")]
fn database_error(err: &surrealdb::Error) -> ServerFnError {
    ServerFnError::<NoCustomError>::ServerError(format!("Database error: {err}"))
}

#[cfg(feature = "ssr")]
fn query_error(err: &surrealdb::Error) -> ServerFnError {
    ServerFnError::<NoCustomError>::ServerError(format!("Query error: {err}"))
}

/// Leading text of server errors raised for a lookup that matched nothing.
pub const NOT_FOUND_PREFIX: &str = "Not found:";
/// Leading text of server errors raised for a malformed slug.
pub const INVALID_SLUG_PREFIX: &str = "Invalid slug format:";

#[cfg(feature = "ssr")]
fn invalid_slug(slug: &str) -> ServerFnError {
    ServerFnError::<NoCustomError>::ServerError(format!(
        "{INVALID_SLUG_PREFIX} '{}'",
        slug.chars().take(50).collect::<String>()
    ))
}

#[cfg(feature = "ssr")]
fn not_found(kind: &str, slug: &str) -> ServerFnError {
    ServerFnError::<NoCustomError>::ServerError(format!("{NOT_FOUND_PREFIX} no {kind} for '{slug}'"))
}

/// Sections of one page, in display order.
#[server(endpoint = "/sections")]
pub async fn select_sections(page: String) -> Result<Vec<Section>, ServerFnError> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let mut query = retry_async("select_sections", RetryConfig::default(), || {
        let page = page.clone();
        async move {
            db.query("SELECT * OMIT id FROM section WHERE page = $page ORDER BY position ASC")
                .bind(("page", page))
                .await
        }
    })
    .await
    .map_err(|e| database_error(&e))?;

    query.take(0).map_err(|e| query_error(&e))
}

/// Published posts, newest first, with display-formatted dates.
#[server(endpoint = "/posts")]
pub async fn select_posts() -> Result<Vec<Post>, ServerFnError> {
    use crate::types::{AppState, format_display_date};
    use leptos::prelude::expect_context;

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let mut query = retry_async("select_posts", RetryConfig::default(), || async {
        db.query("SELECT * OMIT id FROM post WHERE is_published = true ORDER BY created_at DESC")
            .await
    })
    .await
    .map_err(|e| database_error(&e))?;
    let mut posts: Vec<Post> = query.take(0).map_err(|e| query_error(&e))?;

    for post in &mut posts {
        if let Ok(formatted) = format_display_date(&post.created_at) {
            post.created_at = formatted;
        }
    }

    Ok(posts)
}

#[server(endpoint = "/post")]
pub async fn select_post(slug: String) -> Result<Post, ServerFnError> {
    use crate::types::{AppState, format_display_date};
    use leptos::prelude::expect_context;

    if !is_valid_slug(&slug) {
        return Err(invalid_slug(&slug));
    }

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let slug_param = slug.clone();
    let mut query = retry_async("select_post", RetryConfig::default(), || {
        let s = slug_param.clone();
        async move {
            db.query("SELECT * OMIT id FROM post WHERE slug = $slug AND is_published = true LIMIT 1")
                .bind(("slug", s))
                .await
        }
    })
    .await
    .map_err(|e| database_error(&e))?;
    let posts: Vec<Post> = query.take(0).map_err(|e| query_error(&e))?;

    let mut post = posts
        .into_iter()
        .next()
        .ok_or_else(|| not_found("post", &slug))?;
    post.created_at = format_display_date(&post.created_at)?;

    Ok(post)
}

/// Events that have not ended yet, soonest first.
#[server(endpoint = "/events")]
pub async fn select_events() -> Result<Vec<Event>, ServerFnError> {
    use crate::types::AppState;
    use chrono::Utc;
    use leptos::prelude::expect_context;

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let mut query = retry_async("select_events", RetryConfig::default(), || async {
        db.query("SELECT * OMIT id FROM event WHERE is_published = true ORDER BY starts_at ASC")
            .await
    })
    .await
    .map_err(|e| database_error(&e))?;
    let events: Vec<Event> = query.take(0).map_err(|e| query_error(&e))?;

    let now = Utc::now();
    Ok(events.into_iter().filter(|event| event.is_upcoming(now)).collect())
}

/// A city landing page together with its `city:<slug>` sections.
#[server(endpoint = "/city")]
pub async fn select_city(slug: String) -> Result<CityPage, ServerFnError> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;

    if !is_valid_slug(&slug) {
        return Err(invalid_slug(&slug));
    }

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let slug_param = slug.clone();
    let mut query = retry_async("select_city", RetryConfig::default(), || {
        let s = slug_param.clone();
        let page = format!("city:{s}");
        async move {
            db.query(
                "SELECT * OMIT id FROM city WHERE slug = $slug LIMIT 1; \
                 SELECT * OMIT id FROM section WHERE page = $page ORDER BY position ASC",
            )
            .bind(("slug", s))
            .bind(("page", page))
            .await
        }
    })
    .await
    .map_err(|e| database_error(&e))?;
    let cities: Vec<CityPage> = query.take(0).map_err(|e| query_error(&e))?;
    let sections: Vec<Section> = query.take(1).map_err(|e| query_error(&e))?;

    let mut city = cities
        .into_iter()
        .next()
        .ok_or_else(|| not_found("city", &slug))?;
    city.sections = sections;

    Ok(city)
}

#[server(endpoint = "/stand")]
pub async fn select_stand(slug: String) -> Result<StandPage, ServerFnError> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;

    if !is_valid_slug(&slug) {
        return Err(invalid_slug(&slug));
    }

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    let slug_param = slug.clone();
    let mut query = retry_async("select_stand", RetryConfig::default(), || {
        let s = slug_param.clone();
        async move {
            db.query("SELECT * OMIT id FROM stand WHERE slug = $slug LIMIT 1")
                .bind(("slug", s))
                .await
        }
    })
    .await
    .map_err(|e| database_error(&e))?;
    let stands: Vec<StandPage> = query.take(0).map_err(|e| query_error(&e))?;

    stands
        .into_iter()
        .next()
        .ok_or_else(|| not_found("stand", &slug))
}

/// Contact form payload.
///
/// `website` is a honeypot: the field is hidden from people, so anything in
/// it came from a bot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    pub message: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// A contact request that passed validation, with every field escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name too long (max 100 characters)")]
    NameTooLong,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Company too long (max 200 characters)")]
    CompanyTooLong,
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message too long (max 5000 characters)")]
    MessageTooLong,
}

impl ContactRequest {
    /// `true` when the honeypot field was filled in.
    pub fn is_bot(&self) -> bool {
        self.website.as_deref().is_some_and(|website| !website.is_empty())
    }

    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let name = sanitize_html(self.name.trim());
        if name.is_empty() {
            return Err(ContactError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ContactError::NameTooLong);
        }

        let email = validate_email(&self.email)?;

        let company = sanitize_html(self.company.trim());
        if company.len() > MAX_COMPANY_LEN {
            return Err(ContactError::CompanyTooLong);
        }

        let message = sanitize_html(self.message.trim());
        if message.is_empty() {
            return Err(ContactError::EmptyMessage);
        }
        if message.len() > MAX_MESSAGE_LEN {
            return Err(ContactError::MessageTooLong);
        }

        Ok(ContactSubmission {
            name,
            email,
            company,
            message,
        })
    }
}

/// Escapes the characters that matter when the text is later shown as HTML.
pub fn sanitize_html(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '/' => result.push_str("&#x2F;"),
            '`' => result.push_str("&#x60;"),
            _ => result.push(c),
        }
    }
    result
}

fn validate_email(input: &str) -> Result<String, ContactError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ContactError::EmptyEmail);
    }
    let valid = trimmed.len() <= MAX_EMAIL_LEN
        && trimmed.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        })
        && !trimmed.chars().any(char::is_whitespace);
    if !valid {
        return Err(ContactError::InvalidEmail);
    }
    Ok(trimmed.to_lowercase())
}

/// Stores a contact request in the `submission` table.
///
/// Honeypot hits are answered with success and dropped.
#[server(endpoint = "/contact")]
pub async fn submit_contact(data: ContactRequest) -> Result<(), ServerFnError> {
    use crate::types::AppState;
    use leptos::prelude::expect_context;

    if data.is_bot() {
        tracing::warn!("Contact form rejected: honeypot field was filled");
        return Ok(());
    }

    let submission = data
        .validate()
        .map_err(|e| ServerFnError::<NoCustomError>::ServerError(e.to_string()))?;

    let AppState { db, .. } = expect_context::<AppState>();
    let db = db.as_ref();

    retry_async("submit_contact", RetryConfig::default(), || {
        let ContactSubmission {
            name,
            email,
            company,
            message,
        } = submission.clone();
        async move {
            db.query(
                "CREATE submission SET name = $name, email = $email, company = $company, \
                 message = $message, created_at = time::now()",
            )
            .bind(("name", name))
            .bind(("email", email))
            .bind(("company", company))
            .bind(("message", message))
            .await
        }
    })
    .await
    .map_err(|e| database_error(&e))?;

    tracing::info!(email = %submission.email, "Contact submission stored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Ada Lovelace".to_owned(),
            email: "Ada@Example.com".to_owned(),
            company: "Analytical Engines".to_owned(),
            message: "We need a 6x3 stand for March.".to_owned(),
            website: None,
        }
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("berlin"));
        assert!(is_valid_slug("modular-stand_2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("two words"));
        assert!(!is_valid_slug("drop;table"));
        assert!(!is_valid_slug("quote'"));
        assert!(!is_valid_slug(&"a".repeat(201)));
        assert!(is_valid_slug(&"a".repeat(200)));
    }

    #[test]
    fn valid_request_is_normalised() {
        let submission = request().validate().unwrap();
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.message, "We need a 6x3 stand for March.");
    }

    #[test]
    fn request_fields_are_escaped() {
        let submission = ContactRequest {
            message: "<script>alert('x')</script>".to_owned(),
            ..request()
        }
        .validate()
        .unwrap();

        assert!(!submission.message.contains('<'));
        assert!(submission.message.starts_with("&lt;script&gt;"));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_matches!(
            ContactRequest { name: "  ".to_owned(), ..request() }.validate(),
            Err(ContactError::EmptyName)
        );
        assert_matches!(
            ContactRequest { email: String::new(), ..request() }.validate(),
            Err(ContactError::EmptyEmail)
        );
        assert_matches!(
            ContactRequest { message: "\n".to_owned(), ..request() }.validate(),
            Err(ContactError::EmptyMessage)
        );
    }

    #[test]
    fn oversized_fields_are_rejected() {
        assert_matches!(
            ContactRequest { name: "n".repeat(101), ..request() }.validate(),
            Err(ContactError::NameTooLong)
        );
        assert_matches!(
            ContactRequest { company: "c".repeat(201), ..request() }.validate(),
            Err(ContactError::CompanyTooLong)
        );
        assert_matches!(
            ContactRequest { message: "m".repeat(5001), ..request() }.validate(),
            Err(ContactError::MessageTooLong)
        );
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["no-at-sign.com", "@example.com", "ada@localhost", "ada@.com", "ada@example.", "a da@example.com"] {
            assert_matches!(
                ContactRequest { email: bad.to_owned(), ..request() }.validate(),
                Err(ContactError::InvalidEmail),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn honeypot_detection() {
        assert!(!request().is_bot());
        assert!(!ContactRequest { website: Some(String::new()), ..request() }.is_bot());
        assert!(ContactRequest { website: Some("http://spam".to_owned()), ..request() }.is_bot());
    }

    #[test]
    fn contact_errors_read_as_form_messages() {
        assert_eq!(ContactError::EmptyName.to_string(), "Name cannot be empty");
        assert_eq!(
            ContactError::MessageTooLong.to_string(),
            "Message too long (max 5000 characters)"
        );
    }
}
