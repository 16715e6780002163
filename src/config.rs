//! UI configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::notify::ToastTiming;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOGOUT_PATH: &str = "/api/auth/logout";
pub const DEFAULT_ROOT_PATH: &str = "/";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Une erreur est survenue";
pub const DEFAULT_LOGOUT_FAILURE_MESSAGE: &str = "Erreur lors de la déconnexion";
pub const DEFAULT_TOAST_LINGER_MS: u64 = 5000;
pub const DEFAULT_TOAST_EXIT_MS: u64 = 300;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

impl ConfigError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "E_CONFIG_NUMBER",
            Self::InvalidBaseUrl { .. } => "E_CONFIG_BASE_URL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Base URL relative request targets are resolved against. Always ends
    /// with `/`.
    pub api_base_url: String,
    pub toast_timing: ToastTiming,
    pub logout_path: String,
    /// Where the user lands after logout.
    pub root_path: String,
    /// Shown for any failure on the generic request path.
    pub failure_message: String,
    pub logout_failure_message: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: format!("{DEFAULT_API_BASE_URL}/"),
            toast_timing: ToastTiming::default(),
            logout_path: DEFAULT_LOGOUT_PATH.to_owned(),
            root_path: DEFAULT_ROOT_PATH.to_owned(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_owned(),
            logout_failure_message: DEFAULT_LOGOUT_FAILURE_MESSAGE.to_owned(),
        }
    }
}

impl UiConfig {
    /// Build config from the process environment.
    ///
    /// All variables are optional:
    /// - `SINDIC_API_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `SINDIC_TOAST_LINGER_MS`: default 5000
    /// - `SINDIC_TOAST_EXIT_MS`: default 300
    /// - `SINDIC_LOGOUT_PATH`: default `/api/auth/logout`
    /// - `SINDIC_ROOT_PATH`: default `/`
    /// - `SINDIC_FAILURE_MESSAGE`, `SINDIC_LOGOUT_FAILURE_MESSAGE`
    ///
    /// # Errors
    ///
    /// Fails on a non-numeric duration or a base URL that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = normalize_base_url(
            lookup("SINDIC_API_BASE_URL").as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        let toast_timing = ToastTiming {
            linger: Duration::from_millis(parse_ms(&lookup, "SINDIC_TOAST_LINGER_MS", DEFAULT_TOAST_LINGER_MS)?),
            exit: Duration::from_millis(parse_ms(&lookup, "SINDIC_TOAST_EXIT_MS", DEFAULT_TOAST_EXIT_MS)?),
        };

        Ok(Self {
            api_base_url,
            toast_timing,
            logout_path: lookup("SINDIC_LOGOUT_PATH").unwrap_or_else(|| DEFAULT_LOGOUT_PATH.to_owned()),
            root_path: lookup("SINDIC_ROOT_PATH").unwrap_or_else(|| DEFAULT_ROOT_PATH.to_owned()),
            failure_message: lookup("SINDIC_FAILURE_MESSAGE").unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_owned()),
            logout_failure_message: lookup("SINDIC_LOGOUT_FAILURE_MESSAGE")
                .unwrap_or_else(|| DEFAULT_LOGOUT_FAILURE_MESSAGE.to_owned()),
        })
    }
}

/// Validate a base URL and give it a trailing slash so relative targets
/// join under its path prefix.
///
/// # Errors
///
/// Fails when `raw` is not an absolute URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') { trimmed.to_owned() } else { format!("{trimmed}/") };
    reqwest::Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidBaseUrl { value: raw.to_owned(), reason: e.to_string() })?;
    Ok(normalized)
}

fn parse_ms(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        None => Ok(default),
    }
}
