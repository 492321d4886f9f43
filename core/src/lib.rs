//! Blocking, typed client for the shortlink URL-shortening API.
//!
//! # Overview
//! Exposes short links, routing rules, webhooks, pixel presets, custom
//! domains, bio pages and workspaces as request/response DTOs over the
//! service's JSON REST API.
//!
//! ```no_run
//! use shortlink_core::{ClientOptions, CreateLink, ListParams, ShortlinkClient};
//!
//! let client = ShortlinkClient::new(ClientOptions::new("sl_live_xxxxxxxx"))?;
//! let link = client.create_link(&CreateLink::new("https://example.com/spring"))?;
//! let page = client.list_links(ListParams::default())?;
//! assert!(page.data.iter().any(|l| l.id == link.id));
//! # Ok::<(), shortlink_core::ApiError>(())
//! ```
//!
//! # Design
//! - Configuration is validated once, up front (`ClientConfig::validate`).
//! - Each call is split into a pure `build_request`, an I/O-only
//!   `Transport::send` and a pure `parse_response`, so the request and
//!   response handling is testable without a network.
//! - `UreqTransport` enforces the per-request timeout; nothing is retried.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod types;

mod resources;
#[cfg(test)]
mod testing;

pub use client::ShortlinkClient;
pub use config::{ClientConfig, ClientOptions, KeyMode};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::*;
