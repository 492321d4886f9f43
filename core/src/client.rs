//! Request dispatcher for the shortlink API.
//!
//! # Design
//! `ShortlinkClient` owns a validated `ClientConfig` and a `Transport`. Every
//! call goes through three steps:
//!
//! 1. `build_request` resolves an `Endpoint` against the base URL and attaches
//!    the standard headers. Pure.
//! 2. `Transport::send` performs the round-trip and enforces the timeout.
//! 3. `parse_response` checks the status and decodes the JSON body. Pure.
//!
//! The per-resource methods (links, rules, webhooks, ...) live in
//! `crate::resources` as further `impl` blocks on this type.
//!
//! The current workspace id is the only mutable state. Changing it takes
//! `&mut self`, so it can never change underneath an in-flight call.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, ClientOptions};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};

pub(crate) const HEADER_API_KEY: &str = "x-api-key";
pub(crate) const HEADER_CONTENT_TYPE: &str = "content-type";
pub(crate) const HEADER_WORKSPACE_ID: &str = "x-workspace-id";
pub(crate) const HEADER_SOURCE: &str = "x-source";

/// Typed client for the shortlink REST API.
#[derive(Debug, Clone)]
pub struct ShortlinkClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ShortlinkClient<UreqTransport> {
    /// Validate `options` and build a client using the blocking `ureq`
    /// transport.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let config = ClientConfig::validate(options)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }

    /// Build a client from `SHORTLINK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::from_config)
    }
}

impl<T: Transport> ShortlinkClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.config.workspace_id()
    }

    /// Scope subsequent requests to `workspace_id`. An empty id clears it.
    ///
    /// Fails with `ApiError::Config`, leaving the selection untouched, when
    /// the id cannot be sent as a header value.
    pub fn set_workspace_id(&mut self, workspace_id: impl Into<String>) -> Result<()> {
        self.config.set_workspace_id(Some(workspace_id.into()))
    }

    pub fn clear_workspace_id(&mut self) {
        self.config.clear_workspace_id();
    }

    /// Resolve `endpoint` into a concrete request with the standard headers.
    pub fn build_request(&self, endpoint: &Endpoint) -> Result<HttpRequest> {
        let url = self.resolve(endpoint)?;

        let mut headers = vec![
            (HEADER_API_KEY.to_string(), self.config.api_key().to_string()),
            (HEADER_CONTENT_TYPE.to_string(), "application/json".to_string()),
        ];
        if let Some(workspace_id) = self.config.workspace_id() {
            headers.push((HEADER_WORKSPACE_ID.to_string(), workspace_id.to_string()));
        }
        headers.extend(endpoint.headers.iter().cloned());

        Ok(HttpRequest {
            method: endpoint.method,
            url: url.into(),
            headers,
            body: endpoint.body.clone(),
        })
    }

    /// Decode a 2xx body into `R`, or turn anything else into `ApiError::Http`.
    ///
    /// An empty success body decodes as JSON `null`.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R> {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                message: error_message(&response),
            });
        }
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(ApiError::Deserialization)
    }

    /// Build, send and parse one call.
    pub fn call<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R> {
        let request = self.build_request(&endpoint)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = self.transport.send(&request).inspect_err(|error| {
            warn!(method = %request.method, url = %request.url, %error, "request failed");
        })?;
        debug!(status = response.status, "received response");

        self.parse_response(response).inspect_err(|error| {
            warn!(method = %request.method, url = %request.url, %error, "request rejected");
        })
    }

    /// Like `call`, for endpoints whose response body carries nothing useful.
    pub(crate) fn call_discarding(&self, endpoint: Endpoint) -> Result<()> {
        self.call::<IgnoredAny>(endpoint).map(|_| ())
    }

    fn resolve(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = self.config.api_url().clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Config("API URL cannot be used as a base".to_string()))?;
            segments.pop_if_empty();
            segments.extend(endpoint.segments.iter());
        }
        if !endpoint.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &endpoint.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Server-provided `message`, else the status reason phrase.
///
/// Validation failures carry `message` as a list of strings; those are joined.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message").and_then(message_text))
        .filter(|message| !message.is_empty())
        .or_else(|| {
            ureq::http::StatusCode::from_u16(response.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {}", response.status))
}

fn message_text(message: &Value) -> Option<String> {
    match message {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .filter(|part| !part.is_empty())
                .collect();
            Some(parts.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;

    use super::*;
    use crate::http::HttpMethod;

    /// Transport that must never be reached; these tests only cover the pure
    /// halves of the dispatcher.
    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, _request: &HttpRequest) -> Result<HttpResponse> {
            panic!("unexpected network call")
        }
    }

    fn client() -> ShortlinkClient<Unreachable> {
        let config = ClientConfig::validate(
            ClientOptions::new("sl_test_abc123").api_url("http://localhost:3000"),
        )
        .unwrap();
        ShortlinkClient::with_transport(config, Unreachable)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[test]
    fn standard_headers_are_attached_in_order() {
        let req = client().build_request(&Endpoint::get(&["api", "link"])).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/link");
        assert_eq!(
            req.headers,
            vec![
                ("x-api-key".to_string(), "sl_test_abc123".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn workspace_header_follows_set_and_clear() {
        let mut c = client();
        c.set_workspace_id("ws_42").unwrap();
        let req = c.build_request(&Endpoint::get(&["api", "link"])).unwrap();
        assert_eq!(req.header("x-workspace-id"), Some("ws_42"));

        c.clear_workspace_id();
        let req = c.build_request(&Endpoint::get(&["api", "link"])).unwrap();
        assert_eq!(req.header("x-workspace-id"), None);
        assert_eq!(c.workspace_id(), None);
    }

    #[test]
    fn invalid_workspace_id_keeps_previous_selection() {
        let mut c = client();
        c.set_workspace_id("ws_42").unwrap();
        let err = c.set_workspace_id("ws\r\n43").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert_eq!(c.workspace_id(), Some("ws_42"));
    }

    #[test]
    fn endpoint_headers_come_after_standard_ones() {
        let req = client()
            .build_request(&Endpoint::post(&["api", "link"]).header("x-source", "cli"))
            .unwrap();
        assert_eq!(req.headers.last().unwrap(), &("x-source".to_string(), "cli".to_string()));
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let req = client()
            .build_request(&Endpoint::get(&["api", "link", "a b/c?d", "availability"]))
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/link/a%20b%2Fc%3Fd/availability");
    }

    #[test]
    fn base_path_is_preserved() {
        let config = ClientConfig::validate(
            ClientOptions::new("sl_test_abc123").api_url("https://proxy.example.com/shortlink/"),
        )
        .unwrap();
        let c = ShortlinkClient::with_transport(config, Unreachable);
        let req = c.build_request(&Endpoint::get(&["api", "domains"])).unwrap();
        assert_eq!(req.url, "https://proxy.example.com/shortlink/api/domains");
    }

    #[test]
    fn query_pairs_are_appended() {
        let req = client()
            .build_request(&Endpoint::get(&["api", "link"]).query("page", 0).query("search", "a&b"))
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/link?page=0&search=a%26b");
    }

    #[test]
    fn parse_success_body() {
        let thing: Thing = client()
            .parse_response(HttpResponse::new(200, r#"{"id":"lnk_1"}"#))
            .unwrap();
        assert_eq!(thing, Thing { id: "lnk_1".to_string() });
    }

    #[test]
    fn parse_empty_success_body_as_null() {
        let nothing: Option<Thing> = client().parse_response(HttpResponse::new(204, "")).unwrap();
        assert!(nothing.is_none());
    }

    #[test]
    fn parse_bad_json_is_a_deserialization_error() {
        let err = client()
            .parse_response::<Thing>(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn server_message_is_used_verbatim() {
        let err = client()
            .parse_response::<Thing>(HttpResponse::new(
                409,
                r#"{"message":"Key \"promo\" is already taken","code":"conflict"}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, r#"Key "promo" is already taken"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_message_list_is_joined() {
        let err = client()
            .parse_response::<Thing>(HttpResponse::new(
                400,
                r#"{"statusCode":400,"message":["url must be a URL address","key is too long"],"error":"Bad Request"}"#,
            ))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 400: url must be a URL address, key is too long"
        );

        let err = client()
            .parse_response::<Thing>(HttpResponse::new(422, r#"{"message":[]}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 422: Unprocessable Entity");
    }

    #[test]
    fn status_text_is_the_fallback_message() {
        let err = client()
            .parse_response::<Thing>(HttpResponse::new(503, "<html>upstream down</html>"))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

        let err = client()
            .parse_response::<Thing>(HttpResponse::new(404, r#"{"message":""}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn unknown_status_falls_back_to_code() {
        let err = client()
            .parse_response::<Thing>(HttpResponse::new(599, ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 599: HTTP 599");
    }

    #[test]
    fn client_built_from_options_uses_configured_timeout() {
        let c = ShortlinkClient::new(
            ClientOptions::new("sl_live_abc123").timeout(Duration::from_millis(750)),
        )
        .unwrap();
        assert_eq!(c.config().timeout(), Duration::from_millis(750));
    }

    #[test]
    fn client_construction_rejects_bad_keys() {
        assert!(matches!(
            ShortlinkClient::new(ClientOptions::new("")),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ShortlinkClient::new(ClientOptions::new("pk_live_abc")),
            Err(ApiError::Config(_))
        ));
    }
}
