use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ListParams;

/// A short link as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub key: String,
    pub url: String,
    pub domain: Option<String>,
    /// Fully-qualified short URL, e.g. `https://sho.rt/promo`.
    pub short_link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub password_protected: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired_url: Option<String>,
    pub pixel_preset_id: Option<String>,
    /// Integration that created the link (`x-source` at creation time).
    pub source: Option<String>,
    pub utm: Option<UtmParams>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UtmParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Payload for `POST /api/link`. Only `url` is required; a key is generated
/// when none is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_preset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm: Option<UtmParams>,
}

impl CreateLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Payload for `PATCH /api/link/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_preset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm: Option<UtmParams>,
}

/// Filters for `GET /api/link` beyond plain paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkQuery {
    pub params: ListParams,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub domain: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyAvailability {
    #[serde(default)]
    pub key: String,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    Png,
    Svg,
}

impl fmt::Display for QrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrFormat::Png => f.write_str("png"),
            QrFormat::Svg => f.write_str("svg"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QrErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl fmt::Display for QrErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            QrErrorCorrection::L => "L",
            QrErrorCorrection::M => "M",
            QrErrorCorrection::Q => "Q",
            QrErrorCorrection::H => "H",
        };
        f.write_str(level)
    }
}

/// Rendering options for `GET /api/link/{id}/qrcode`, sent as query pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeOptions {
    pub format: Option<QrFormat>,
    /// Edge length in pixels.
    pub size: Option<u32>,
    pub margin: Option<u32>,
    /// Hex colour, e.g. `#000000`.
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub error_correction: Option<QrErrorCorrection>,
}

/// A rendered QR code. `data` holds SVG markup or a base64 PNG data URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub format: QrFormat,
    pub data: String,
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_link_serializes_only_set_fields() {
        let input = CreateLink {
            key: Some("promo".to_string()),
            ..CreateLink::new("https://example.com/spring")
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body, json!({"url": "https://example.com/spring", "key": "promo"}));
    }

    #[test]
    fn update_link_uses_camel_case() {
        let input = UpdateLink {
            expired_url: Some("https://example.com/gone".to_string()),
            archived: Some(true),
            ..UpdateLink::default()
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({"expiredUrl": "https://example.com/gone", "archived": true})
        );
    }

    #[test]
    fn link_tolerates_missing_optional_fields() {
        let link: Link = serde_json::from_value(json!({
            "id": "lnk_1",
            "key": "promo",
            "url": "https://example.com",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert!(link.tags.is_empty());
        assert_eq!(link.clicks, 0);
        assert!(!link.archived);
        assert!(link.expires_at.is_none());
    }

    #[test]
    fn qr_enums_render_as_query_values() {
        assert_eq!(QrFormat::Svg.to_string(), "svg");
        assert_eq!(QrErrorCorrection::Q.to_string(), "Q");
        assert_eq!(serde_json::to_value(QrFormat::Png).unwrap(), json!("png"));
    }
}
