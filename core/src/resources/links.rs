//! Short link operations under `/api/link`.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::client::{ShortlinkClient, HEADER_SOURCE};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, Result};
use crate::http::Transport;
use crate::types::{
    CreateLink, KeyAvailability, Link, LinkQuery, ListParams, Paginated, QrCode, QrCodeOptions,
    QrFormat, UpdateLink,
};

impl<T: Transport> ShortlinkClient<T> {
    /// One page of links from `GET /api/link`.
    pub fn list_links(&self, params: ListParams) -> Result<Paginated<Link>> {
        self.call(params.apply(Endpoint::get(&["api", "link"])))
    }

    /// `GET /api/link` with search and filter parameters.
    pub fn search_links(&self, query: &LinkQuery) -> Result<Paginated<Link>> {
        let endpoint = query
            .params
            .apply(Endpoint::get(&["api", "link"]))
            .query_opt("search", query.search.as_deref())
            .query_opt("tag", query.tag.as_deref())
            .query_opt("domain", query.domain.as_deref())
            .query_opt("archived", query.archived);
        self.call(endpoint)
    }

    pub fn get_link(&self, id: &str) -> Result<Link> {
        self.call(Endpoint::get(&["api", "link", id]))
    }

    /// `POST /api/link`. Carries `x-source` when the client has a source tag.
    pub fn create_link(&self, input: &CreateLink) -> Result<Link> {
        let mut endpoint = Endpoint::post(&["api", "link"]).json(input)?;
        if let Some(source) = self.config().source() {
            endpoint = endpoint.header(HEADER_SOURCE, source);
        }
        self.call(endpoint)
    }

    /// Create a link that the server expires `ttl` from now.
    pub fn create_ephemeral_link(&self, url: &str, ttl: Duration) -> Result<Link> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| ApiError::Config(format!("ttl {ttl} is out of range")))?;
        debug!(%expires_at, "creating ephemeral link");
        self.create_link(&CreateLink {
            expires_at: Some(expires_at),
            ..CreateLink::new(url)
        })
    }

    pub fn update_link(&self, id: &str, input: &UpdateLink) -> Result<Link> {
        self.call(Endpoint::patch(&["api", "link", id]).json(input)?)
    }

    pub fn delete_link(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "link", id]))
    }

    /// Whether `key` is still free on the default domain.
    pub fn check_key_availability(&self, key: &str) -> Result<KeyAvailability> {
        self.call(Endpoint::get(&["api", "link", key, "availability"]))
    }

    pub fn get_qr_code(&self, id: &str, options: &QrCodeOptions) -> Result<QrCode> {
        self.call(qr_code_endpoint(id, options))
    }

    /// Like `get_qr_code`, always rendering PNG whatever `options.format` says.
    pub fn get_qr_code_png(&self, id: &str, options: &QrCodeOptions) -> Result<QrCode> {
        self.call(qr_code_endpoint(id, options).query_override("format", QrFormat::Png))
    }

    /// Like `get_qr_code`, always rendering SVG whatever `options.format` says.
    pub fn get_qr_code_svg(&self, id: &str, options: &QrCodeOptions) -> Result<QrCode> {
        self.call(qr_code_endpoint(id, options).query_override("format", QrFormat::Svg))
    }
}

fn qr_code_endpoint(id: &str, options: &QrCodeOptions) -> Endpoint {
    Endpoint::get(&["api", "link", id, "qrcode"])
        .query_opt("format", options.format)
        .query_opt("size", options.size)
        .query_opt("margin", options.margin)
        .query_opt("foreground", options.foreground.as_deref())
        .query_opt("background", options.background.as_deref())
        .query_opt("errorCorrection", options.error_correction)
}
