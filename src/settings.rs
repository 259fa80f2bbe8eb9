//! Process configuration read from the environment.

use std::env;
use thiserror::Error;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "TASKGATE_BACKEND_URL";
/// Environment variable holding the backend API key.
pub const BACKEND_API_KEY_VAR: &str = "TASKGATE_BACKEND_API_KEY";
/// Environment variable holding the chat bot token.
pub const BOT_TOKEN_VAR: &str = "TASKGATE_BOT_TOKEN";

/// Errors raised while loading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is unset or empty.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
}

/// Connection settings for the two external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    backend_base_url: String,
    backend_api_key: String,
    bot_token: String,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first unset or empty
    /// variable.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads settings through an injected variable lookup.
    ///
    /// Blank values count as unset. Trailing slashes on the base URL are
    /// trimmed so adapters can join paths without doubling separators.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first unset or empty
    /// variable.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let require = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(SettingsError::Missing(name))
        };

        let base_url = require(BACKEND_URL_VAR)?;
        Ok(Self {
            backend_base_url: base_url.trim_end_matches('/').to_owned(),
            backend_api_key: require(BACKEND_API_KEY_VAR)?,
            bot_token: require(BOT_TOKEN_VAR)?,
        })
    }

    /// Returns the backend base URL without a trailing slash.
    #[must_use]
    pub fn backend_base_url(&self) -> &str {
        &self.backend_base_url
    }

    /// Returns the backend API key.
    #[must_use]
    pub fn backend_api_key(&self) -> &str {
        &self.backend_api_key
    }

    /// Returns the chat bot token.
    #[must_use]
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }
}
