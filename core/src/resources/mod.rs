//! Per-resource operations, each an `impl` block on `ShortlinkClient`.
//!
//! Methods map their arguments onto an `Endpoint` and hand it to
//! `ShortlinkClient::call`; there is no business logic here beyond paging
//! defaults.

mod bio_pages;
mod domains;
mod links;
mod pixel_presets;
mod rules;
mod webhooks;
mod workspaces;
