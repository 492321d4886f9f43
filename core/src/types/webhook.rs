use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub name: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
    #[serde(default)]
    pub enabled: bool,
    /// Signing secret. Only present on creation and after rotation.
    pub secret: Option<String>,
    pub last_triggered_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    #[serde(rename = "link.created")]
    LinkCreated,
    #[serde(rename = "link.updated")]
    LinkUpdated,
    #[serde(rename = "link.deleted")]
    LinkDeleted,
    #[serde(rename = "link.clicked")]
    LinkClicked,
    #[serde(rename = "link.expired")]
    LinkExpired,
    #[serde(rename = "bio_page.viewed")]
    BioPageViewed,
    #[serde(rename = "domain.verified")]
    DomainVerified,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebhook {
    pub url: String,
    pub events: Vec<WebhookEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<WebhookEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Outcome of a test delivery triggered through the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTestResult {
    pub success: bool,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<u64>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_use_dotted_names() {
        let input = CreateWebhook {
            url: "https://hooks.example.com/in".to_string(),
            events: vec![WebhookEvent::LinkClicked, WebhookEvent::BioPageViewed],
            ..CreateWebhook::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "url": "https://hooks.example.com/in",
                "events": ["link.clicked", "bio_page.viewed"]
            })
        );
    }

    #[test]
    fn unlisted_event_decodes_as_unknown() {
        let events: Vec<WebhookEvent> =
            serde_json::from_value(json!(["link.created", "qr.scanned"])).unwrap();
        assert_eq!(events, vec![WebhookEvent::LinkCreated, WebhookEvent::Unknown]);
    }
}
