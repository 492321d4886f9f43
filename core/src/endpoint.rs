//! Description of a single API call, before it is bound to a base URL.

use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::HttpMethod;

/// Method, path, query, body and extra headers for one call.
///
/// Path segments are stored raw and percent-encoded when the client resolves
/// them against its base URL, so ids and keys can be passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub(crate) method: HttpMethod,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(method: HttpMethod, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Get, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Post, segments)
    }

    pub fn put(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Put, segments)
    }

    pub fn patch(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Patch, segments)
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Delete, segments)
    }

    /// Append a query pair. Later pairs with the same key are sent as well.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Replace any existing value for `key`.
    pub fn query_override(mut self, key: &str, value: impl ToString) -> Self {
        self.query.retain(|(k, _)| k != key);
        self.query(key, value)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let encoded = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        self.body = Some(encoded);
        Ok(self)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }
}
