//! Client configuration and its validation.
//!
//! # Design
//! `ClientOptions` is what callers fill in; `ClientConfig` is the validated,
//! fully-defaulted record the client runs on. The only way to obtain a
//! `ClientConfig` is through `ClientConfig::validate` (or `from_env`, which
//! funnels into it), so a constructed client always holds a well-formed key
//! and an absolute base URL.

use std::fmt;
use std::time::Duration;

use ureq::http::HeaderValue;
use url::Url;

use crate::error::{ApiError, Result};

pub const LIVE_KEY_PREFIX: &str = "sl_live_";
pub const TEST_KEY_PREFIX: &str = "sl_test_";

pub const DEFAULT_API_URL: &str = "https://api.shortlink.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_ENV: &str = "SHORTLINK_API_KEY";
pub const API_URL_ENV: &str = "SHORTLINK_API_URL";
pub const TIMEOUT_MS_ENV: &str = "SHORTLINK_TIMEOUT_MS";
pub const WORKSPACE_ID_ENV: &str = "SHORTLINK_WORKSPACE_ID";
pub const SOURCE_ENV: &str = "SHORTLINK_SOURCE";

/// Caller-supplied options. Everything except `api_key` is optional.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub api_key: String,
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
    pub workspace_id: Option<String>,
    /// Sent as `x-source` when creating links.
    pub source: Option<String>,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Whether a key talks to live or test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Live,
    Test,
}

/// Validated client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    api_url: Url,
    timeout: Duration,
    workspace_id: Option<String>,
    source: Option<String>,
}

impl ClientConfig {
    /// Validate `options` and fill in defaults.
    pub fn validate(options: ClientOptions) -> Result<Self> {
        let api_key = options.api_key.trim().to_string();
        key_mode(&api_key)?;

        let api_url = parse_api_url(options.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?;

        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(Self {
            api_key,
            api_url,
            timeout,
            workspace_id: header_value("workspace id", options.workspace_id)?,
            source: header_value("source", options.source)?,
        })
    }

    /// Build a configuration from `SHORTLINK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = match lookup(TIMEOUT_MS_ENV) {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Config(format!("{TIMEOUT_MS_ENV} must be a number of milliseconds, got {raw:?}"))
                })?;
                Some(Duration::from_millis(millis))
            }
            None => None,
        };

        Self::validate(ClientOptions {
            api_key: lookup(API_KEY_ENV).unwrap_or_default(),
            api_url: lookup(API_URL_ENV),
            timeout,
            workspace_id: lookup(WORKSPACE_ID_ENV),
            source: lookup(SOURCE_ENV),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn key_mode(&self) -> KeyMode {
        if self.api_key.starts_with(TEST_KEY_PREFIX) {
            KeyMode::Test
        } else {
            KeyMode::Live
        }
    }

    pub(crate) fn set_workspace_id(&mut self, workspace_id: Option<String>) -> Result<()> {
        self.workspace_id = header_value("workspace id", workspace_id)?;
        Ok(())
    }

    pub(crate) fn clear_workspace_id(&mut self) {
        self.workspace_id = None;
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field("workspace_id", &self.workspace_id)
            .field("source", &self.source)
            .finish()
    }
}

fn key_mode(api_key: &str) -> Result<KeyMode> {
    if api_key.is_empty() {
        return Err(ApiError::Config("API key is required".to_string()));
    }

    let (mode, secret) = if let Some(rest) = api_key.strip_prefix(LIVE_KEY_PREFIX) {
        (KeyMode::Live, rest)
    } else if let Some(rest) = api_key.strip_prefix(TEST_KEY_PREFIX) {
        (KeyMode::Test, rest)
    } else {
        return Err(ApiError::Config(format!(
            "API key must start with {LIVE_KEY_PREFIX} or {TEST_KEY_PREFIX}"
        )));
    };

    if secret.is_empty() || secret.chars().any(char::is_whitespace) {
        return Err(ApiError::Config("API key is malformed".to_string()));
    }
    Ok(mode)
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::Config(format!("invalid API URL {raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("API URL must be an http(s) URL, got {raw:?}")));
    }
    Ok(url)
}

/// Blank values count as unset; anything else must be sendable as a header.
fn header_value(what: &str, value: Option<String>) -> Result<Option<String>> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) if HeaderValue::from_str(&v).is_err() => Err(ApiError::Config(format!(
            "{what} contains characters not allowed in an HTTP header"
        ))),
        other => Ok(other),
    }
}
