use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A custom domain attached to the account or workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub domain: String,
    pub status: DomainStatus,
    pub verified_at: Option<DateTime<Utc>>,
    /// Where visitors to the bare domain are sent.
    pub redirect_url: Option<String>,
    /// Where visitors to an unknown key are sent.
    pub not_found_url: Option<String>,
    /// Records the owner must publish before verification can succeed.
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub verified: bool,
}

/// Verification state, driven entirely by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Pending,
    Verifying,
    Verified,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomain {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let domain: Domain = serde_json::from_value(json!({
            "id": "dom_1",
            "domain": "go.example.com",
            "status": "suspended",
            "dnsRecords": [{"type": "CNAME", "name": "go", "value": "cname.shortlink.io"}]
        }))
        .unwrap();
        assert_eq!(domain.status, DomainStatus::Unknown);
        assert_eq!(domain.dns_records[0].record_type, "CNAME");
        assert!(!domain.dns_records[0].verified);
    }
}
