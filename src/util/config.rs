//! Backend origin and request timeout resolution.
//!
//! Precedence for the origin: `DEALERSHIP_ORIGIN`, then the origin saved from
//! the settings page, then [`DEFAULT_ORIGIN`].

use std::{env, time::Duration};

use thiserror::Error;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ORIGIN_ENV: &str = "DEALERSHIP_ORIGIN";
pub const TIMEOUT_ENV: &str = "DEALERSHIP_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme {0:?}; use http or https")]
    UnsupportedScheme(String),
    #[error("invalid timeout {0:?}; expected whole seconds")]
    InvalidTimeout(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Always ends with `/` so relative joins stay under it.
    pub origin: Url,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: Url::parse(&format!("{DEFAULT_ORIGIN}/")).expect("default origin is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads the process environment on top of `saved_origin`.
    pub fn resolve(saved_origin: Option<&str>) -> Result<Self, ConfigError> {
        let env_origin = env::var(ORIGIN_ENV).ok();
        let env_timeout = env::var(TIMEOUT_ENV).ok();
        Self::from_sources(env_origin.as_deref(), saved_origin, env_timeout.as_deref())
    }

    pub fn from_sources(
        env_origin: Option<&str>,
        saved_origin: Option<&str>,
        env_timeout: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let origin = [env_origin, saved_origin]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|raw| !raw.is_empty())
            .unwrap_or(DEFAULT_ORIGIN);
        let timeout = match env_timeout.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_timeout(raw)?,
            None => DEFAULT_TIMEOUT,
        };
        Ok(Self {
            origin: parse_origin(origin)?,
            timeout,
        })
    }

    /// Whether `DEALERSHIP_ORIGIN` currently overrides the saved origin.
    pub fn origin_overridden() -> bool {
        env::var(ORIGIN_ENV)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Parses an http(s) origin and normalises its path to end with `/`.
pub fn parse_origin(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidOrigin {
        origin: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// The origin as users type it: no trailing slash.
pub fn origin_label(origin: &Url) -> String {
    origin.as_str().trim_end_matches('/').to_string()
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_sources(None, None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(origin_label(&config.origin), DEFAULT_ORIGIN);
    }

    #[test]
    fn environment_beats_saved_origin() {
        let config = ClientConfig::from_sources(
            Some("https://env.example.com"),
            Some("https://saved.example.com"),
            None,
        )
        .unwrap();
        assert_eq!(config.origin.as_str(), "https://env.example.com/");
    }

    #[test]
    fn blank_environment_falls_through() {
        let config =
            ClientConfig::from_sources(Some("  "), Some("https://saved.example.com"), None)
                .unwrap();
        assert_eq!(config.origin.as_str(), "https://saved.example.com/");
    }

    #[test]
    fn origin_paths_get_a_trailing_slash() {
        let url = parse_origin("https://labs.example.com/proxy/8000?x=1#top").unwrap();
        assert_eq!(url.as_str(), "https://labs.example.com/proxy/8000/");
        assert_eq!(origin_label(&url), "https://labs.example.com/proxy/8000");
    }

    #[test]
    fn rejects_non_http_origins() {
        assert_eq!(
            parse_origin("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme("ftp".into()))
        );
        assert!(matches!(
            parse_origin("not a url"),
            Err(ConfigError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn timeout_from_environment() {
        let config = ClientConfig::from_sources(None, None, Some("30")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            ClientConfig::from_sources(None, None, Some("0")),
            Err(ConfigError::InvalidTimeout("0".into()))
        );
        assert_eq!(
            ClientConfig::from_sources(None, None, Some("soon")),
            Err(ConfigError::InvalidTimeout("soon".into()))
        );
    }
}
