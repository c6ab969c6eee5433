//! Configuration loaded from the process environment.

use std::time::Duration;

use notionmail_store::NotionClient;

use crate::{Error, Result};

/// Integration token for the Notion API.
pub const API_KEY_VAR: &str = "NOTION_API_KEY";
/// ID of the database holding the messages.
pub const DATABASE_ID_VAR: &str = "NOTION_PAGE_ID";
/// Optional API base URL override.
pub const BASE_URL_VAR: &str = "NOTION_BASE_URL";
/// Optional request timeout in seconds.
pub const TIMEOUT_VAR: &str = "NOTION_TIMEOUT_SECS";

/// Settings required to reach the message store.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Integration token.
    pub api_key: String,
    /// Database ID.
    pub database_id: String,
    /// API base URL, if overridden.
    pub base_url: Option<String>,
    /// Request timeout, if overridden.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a required variable is missing or empty,
    /// or an optional one is malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a required variable is missing or empty,
    /// or an optional one is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_VAR);
        let database_id = get(DATABASE_ID_VAR);

        let (api_key, database_id) = match (api_key, database_id) {
            (Some(api_key), Some(database_id)) => (api_key, database_id),
            (api_key, database_id) => {
                let missing: Vec<&str> = [
                    api_key.is_none().then_some(API_KEY_VAR),
                    database_id.is_none().then_some(DATABASE_ID_VAR),
                ]
                .into_iter()
                .flatten()
                .collect();
                return Err(Error::Config(format!(
                    "missing required environment variable(s): {}",
                    missing.join(", ")
                )));
            }
        };

        let timeout = get(TIMEOUT_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        Error::Config(format!("{TIMEOUT_VAR} must be a positive integer, got {raw:?}"))
                    })
            })
            .transpose()?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            database_id: database_id.trim().to_string(),
            base_url: get(BASE_URL_VAR),
            timeout,
        })
    }

    /// Builds a Notion client from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the client cannot be configured.
    pub fn connect(&self) -> Result<NotionClient> {
        let to_config = |e: notionmail_store::Error| Error::Config(e.to_string());

        let mut client = NotionClient::new(&self.api_key, &self.database_id).map_err(to_config)?;
        if let Some(url) = &self.base_url {
            client = client.with_base_url(url).map_err(to_config)?;
        }
        if let Some(timeout) = self.timeout {
            client = client.with_timeout(timeout);
        }
        Ok(client)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_complete_config() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_abc"),
            (DATABASE_ID_VAR, "db123"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret_abc");
        assert_eq!(config.database_id, "db123");
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_missing_variables_are_named() {
        let error = Config::from_lookup(lookup(&[(DATABASE_ID_VAR, "  ")])).unwrap_err();
        let message = error.to_string();
        assert!(message.contains(API_KEY_VAR));
        assert!(message.contains(DATABASE_ID_VAR));

        let error = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret_abc")])).unwrap_err();
        assert!(!error.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_optional_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_abc"),
            (DATABASE_ID_VAR, "db123"),
            (BASE_URL_VAR, "http://localhost:9000/v1"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        let client = config.connect().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/v1/");
    }

    #[test]
    fn test_bad_timeout() {
        let result = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_abc"),
            (DATABASE_ID_VAR, "db123"),
            (TIMEOUT_VAR, "soon"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret_abc"),
            (DATABASE_ID_VAR, "db123"),
        ]))
        .unwrap();
        assert!(!format!("{config:?}").contains("secret_abc"));
    }
}
