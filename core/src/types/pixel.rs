use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named bundle of tracking pixels that can be attached to links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PixelPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pixels: Vec<Pixel>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pixel {
    pub platform: PixelPlatform,
    pub pixel_id: String,
}

impl Pixel {
    pub fn new(platform: PixelPlatform, pixel_id: impl Into<String>) -> Self {
        Self {
            platform,
            pixel_id: pixel_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PixelPlatform {
    Facebook,
    GoogleAnalytics,
    GoogleTagManager,
    GoogleAds,
    Tiktok,
    Linkedin,
    Twitter,
    Pinterest,
    Snapchat,
    Reddit,
    Quora,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePixelPreset {
    pub name: String,
    pub pixels: Vec<Pixel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePixelPreset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels: Option<Vec<Pixel>>,
}
