//! SurrealDB connection for the content server functions.

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::remote::http::{Client, Http, Https};
use surrealdb::opt::auth::{Database, Root};
use tokio_retry::{Retry, strategy::ExponentialBackoff};

const DEFAULT_HOST: &str = "127.0.0.1:8000";
const DEFAULT_NAMESPACE: &str = "site";
const DEFAULT_DATABASE: &str = "site";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    fn from_pair(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|value| !value.is_empty())?;
        Some(Self {
            username,
            password: password.unwrap_or_default(),
        })
    }
}

/// Connection settings read from `SURREAL_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub protocol: Protocol,
    pub host: String,
    pub namespace: String,
    pub database: String,
    /// Database-level user; tried before `root`.
    pub database_user: Option<Credentials>,
    pub root_user: Option<Credentials>,
}

impl DbConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from any key lookup. Unset and empty values fall
    /// back to defaults; anything but `https` means plain HTTP.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let protocol = match non_empty("SURREAL_PROTOCOL").as_deref() {
            Some("https") => Protocol::Https,
            _ => Protocol::Http,
        };

        Self {
            protocol,
            host: non_empty("SURREAL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            namespace: non_empty("SURREAL_NS").unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned()),
            database: non_empty("SURREAL_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_owned()),
            database_user: Credentials::from_pair(
                lookup("SURREAL_USERNAME"),
                lookup("SURREAL_PASSWORD"),
            ),
            root_user: Credentials::from_pair(
                lookup("SURREAL_ROOT_USER"),
                lookup("SURREAL_ROOT_PASS"),
            ),
        }
    }

    fn url(&self) -> String {
        let scheme = match self.protocol {
            Protocol::Http => "http",
            Protocol::Https => "https",
        };
        format!("{scheme}://{}", self.host)
    }
}

async fn sign_in(db: &Surreal<Client>, config: &DbConfig) -> Result<(), surrealdb::Error> {
    let mut last_err = None;

    if let Some(Credentials { username, password }) = &config.database_user {
        match db
            .signin(Database {
                namespace: &config.namespace,
                database: &config.database,
                username,
                password,
            })
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::debug!("Database authentication attempt failed: {e:?}");
                last_err = Some(e);
            }
        }
    }

    if let Some(Credentials { username, password }) = &config.root_user {
        match db.signin(Root { username, password }).await {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::debug!("Root authentication attempt failed: {e:?}");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(err) => Err(err),
        None => {
            tracing::warn!("No SurrealDB credentials configured; continuing unauthenticated");
            Ok(())
        }
    }
}

/// Connects, signs in and selects the namespace and database, retrying each
/// step with exponential backoff.
pub async fn connect(config: &DbConfig) -> Result<Surreal<Client>, surrealdb::Error> {
    let connect_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(5);

    let db = Retry::spawn(connect_strategy, || async {
        tracing::info!("Attempting to connect to SurrealDB at {}", config.url());
        match config.protocol {
            Protocol::Http => Surreal::new::<Http>(config.host.as_str()).await,
            Protocol::Https => Surreal::new::<Https>(config.host.as_str()).await,
        }
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to connect to SurrealDB after retries: {e:?}");
        e
    })?;

    let auth_strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(3))
        .take(3);

    Retry::spawn(auth_strategy, || sign_in(&db, config))
        .await
        .map_err(|e| {
            if config.database_user.is_some() {
                tracing::error!(
                    "Database-level credentials were rejected. Verify `SURREAL_USERNAME`/`SURREAL_PASSWORD` and access to namespace `{}` and database `{}`.",
                    config.namespace,
                    config.database,
                );
            } else {
                tracing::error!(
                    "Root credentials were rejected. Verify `SURREAL_ROOT_USER`/`SURREAL_ROOT_PASS`."
                );
            }
            e
        })?;

    let select_strategy = ExponentialBackoff::from_millis(50)
        .max_delay(Duration::from_secs(2))
        .take(3);

    Retry::spawn(select_strategy, || {
        let namespace = config.namespace.clone();
        let database = config.database.clone();
        let db = &db;
        async move { db.use_ns(namespace).use_db(database).await }
    })
    .await
    .map_err(|e| {
        tracing::error!("Failed to set namespace/database after retries: {e:?}");
        e
    })?;

    tracing::info!(
        namespace = %config.namespace,
        database = %config.database,
        "Connected to SurrealDB"
    );
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = DbConfig::from_lookup(lookup(&[]));

        assert_eq!(config.protocol, Protocol::Http);
        assert_eq!(config.host, "127.0.0.1:8000");
        assert_eq!(config.namespace, "site");
        assert_eq!(config.database, "site");
        assert!(config.database_user.is_none());
        assert!(config.root_user.is_none());
        assert_eq!(config.url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = DbConfig::from_lookup(lookup(&[
            ("SURREAL_HOST", ""),
            ("SURREAL_NS", ""),
            ("SURREAL_USERNAME", ""),
            ("SURREAL_PASSWORD", "secret"),
        ]));

        assert_eq!(config.host, "127.0.0.1:8000");
        assert_eq!(config.namespace, "site");
        assert!(config.database_user.is_none());
    }

    #[test]
    fn explicit_settings_are_used() {
        let config = DbConfig::from_lookup(lookup(&[
            ("SURREAL_PROTOCOL", "https"),
            ("SURREAL_HOST", "db.example.com"),
            ("SURREAL_NS", "expo"),
            ("SURREAL_DB", "content"),
            ("SURREAL_USERNAME", "site"),
            ("SURREAL_PASSWORD", "hunter2"),
            ("SURREAL_ROOT_USER", "root"),
            ("SURREAL_ROOT_PASS", "root"),
        ]));

        assert_eq!(config.protocol, Protocol::Https);
        assert_eq!(config.url(), "https://db.example.com");
        assert_eq!(config.namespace, "expo");
        assert_eq!(config.database, "content");
        assert_eq!(
            config.database_user,
            Some(Credentials {
                username: "site".to_owned(),
                password: "hunter2".to_owned(),
            })
        );
        assert_eq!(config.root_user.map(|c| c.username).as_deref(), Some("root"));
    }

    #[test]
    fn unknown_protocol_falls_back_to_http() {
        let config = DbConfig::from_lookup(lookup(&[("SURREAL_PROTOCOL", "ws")]));
        assert_eq!(config.protocol, Protocol::Http);
    }

    #[test]
    fn missing_password_becomes_empty() {
        let config = DbConfig::from_lookup(lookup(&[("SURREAL_ROOT_USER", "root")]));
        assert_eq!(
            config.root_user,
            Some(Credentials {
                username: "root".to_owned(),
                password: String::new(),
            })
        );
    }
}
