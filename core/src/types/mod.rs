//! Request and response DTOs for the shortlink API.
//!
//! # Design
//! These types mirror the server's JSON shapes (camelCase on the wire) and
//! carry no behavior beyond serialization. Request DTOs skip unset optional
//! fields, so a PATCH sends exactly what the caller filled in. Response DTOs
//! default missing collections and flags instead of failing, since the server
//! omits empty values on some routes.

mod bio_page;
mod common;
mod domain;
mod link;
mod pixel;
mod rule;
mod webhook;
mod workspace;

pub use bio_page::{BioLink, BioPage, BioTheme, CreateBioPage, SocialLink, UpdateBioPage};
pub use common::{ListParams, Paginated, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};
pub use domain::{CreateDomain, DnsRecord, Domain, DomainStatus, UpdateDomain};
pub use link::{
    CreateLink, KeyAvailability, Link, LinkQuery, QrCode, QrCodeOptions, QrErrorCorrection,
    QrFormat, UpdateLink, UtmParams,
};
pub use pixel::{CreatePixelPreset, Pixel, PixelPlatform, PixelPreset, UpdatePixelPreset};
pub use rule::{
    CreateLinkRule, LinkRule, RuleCondition, RuleField, RuleMatch, RuleOperator, UpdateLinkRule,
};
pub use webhook::{CreateWebhook, UpdateWebhook, Webhook, WebhookEvent, WebhookTestResult};
pub use workspace::{
    CreateWorkspace, CreateWorkspaceInvite, InviteStatus, UpdateWorkspace, Workspace,
    WorkspaceInvite, WorkspaceMember, WorkspaceRole,
};
