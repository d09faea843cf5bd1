use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use leptos::config::LeptosOptions;
#[cfg(feature = "ssr")]
use surrealdb::{Surreal, engine::remote::http::Client};

#[cfg(feature = "ssr")]
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub db: std::sync::Arc<Surreal<Client>>,
    pub leptos_options: std::sync::Arc<LeptosOptions>,
}

#[cfg(feature = "ssr")]
impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.as_ref().clone()
    }
}

/// How a page section is laid out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    #[default]
    Text,
    Gallery,
    CallToAction,
}

/// One admin-managed block of a page (home, or a city page).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Section {
    pub page: String,
    #[serde(default)]
    pub kind: SectionKind,
    pub heading: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_href: Option<String>,
    #[serde(default)]
    pub position: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Post {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Rendered HTML, as stored by the admin editor.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub header_image: Option<String>,
    #[serde(default)]
    pub read_time: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Event {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub venue: String,
    pub city: String,
    pub starts_at: String,
    #[serde(default)]
    pub ends_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Event {
    /// `true` when the event has not ended by `now`. Events without an end
    /// date count as ending when they start. Unparseable dates are kept.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        let end = self.ends_at.as_deref().unwrap_or(&self.starts_at);
        DateTime::parse_from_rfc3339(end).map_or(true, |end| end.with_timezone(&Utc) >= now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CityPage {
    pub slug: String,
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Landing page for one exhibition-stand product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StandPage {
    pub slug: String,
    pub title: String,
    pub headline: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    /// Starting price in whole euros.
    #[serde(default)]
    pub price_from: Option<u32>,
}

/// Reformats an RFC 3339 timestamp as e.g. `Mar 7, 2026`.
pub fn format_display_date(raw: &str) -> Result<String, chrono::ParseError> {
    let date_time = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
    Ok(date_time.date_naive().format("%b %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_defaults_fill_missing_fields() {
        let section: Section = serde_json::from_value(json!({
            "page": "home",
            "heading": "Stands that sell"
        }))
        .unwrap();

        assert_eq!(section.kind, SectionKind::Text);
        assert_eq!(section.position, 0);
        assert!(section.image.is_none());
        assert!(section.body.is_empty());
    }

    #[test]
    fn section_kind_uses_snake_case() {
        let section: Section = serde_json::from_value(json!({
            "page": "home",
            "heading": "Book a consultation",
            "kind": "call_to_action",
            "cta_label": "Contact us",
            "cta_href": "/contact"
        }))
        .unwrap();

        assert_eq!(section.kind, SectionKind::CallToAction);
        assert_eq!(section.cta_href.as_deref(), Some("/contact"));
    }

    #[test]
    fn city_row_without_sections_defaults_to_empty() {
        let city: CityPage = serde_json::from_value(json!({
            "slug": "berlin",
            "name": "Berlin",
            "headline": "Exhibition stands in Berlin"
        }))
        .unwrap();

        assert!(city.sections.is_empty());
    }

    #[test]
    fn city_sections_survive_the_trip_to_the_browser() {
        let city = CityPage {
            slug: "berlin".to_owned(),
            name: "Berlin".to_owned(),
            headline: "Exhibition stands in Berlin".to_owned(),
            sections: vec![Section {
                page: "city:berlin".to_owned(),
                heading: "Messe Berlin".to_owned(),
                position: 1,
                ..Section::default()
            }],
            ..CityPage::default()
        };

        let payload = serde_json::to_string(&city).unwrap();
        let hydrated: CityPage = serde_json::from_str(&payload).unwrap();

        assert_eq!(hydrated, city);
        assert_eq!(hydrated.sections.len(), 1);
    }

    #[test]
    fn upcoming_uses_end_date_when_present() {
        let now = DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut event = Event {
            starts_at: "2026-03-08T09:00:00Z".to_owned(),
            ends_at: Some("2026-03-11T18:00:00Z".to_owned()),
            ..Event::default()
        };
        assert!(event.is_upcoming(now), "still running");

        event.ends_at = None;
        assert!(!event.is_upcoming(now), "started and had no end date");

        event.starts_at = "soon".to_owned();
        assert!(event.is_upcoming(now), "unparseable dates are kept");
    }

    #[test]
    fn display_date_formatting() {
        assert_eq!(format_display_date("2026-03-07T10:00:00Z").unwrap(), "Mar 7, 2026");
        assert!(format_display_date("next tuesday").is_err());
    }
}
