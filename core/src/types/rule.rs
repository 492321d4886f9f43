use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conditional redirect attached to a link. The server evaluates rules in
/// `priority` order and sends the visitor to the first match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkRule {
    pub id: String,
    pub link_id: Option<String>,
    pub name: Option<String>,
    pub destination_url: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub match_mode: RuleMatch,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    pub field: RuleField,
    pub operator: RuleOperator,
    /// A string, number or list depending on `operator`.
    pub value: serde_json::Value,
}

impl RuleCondition {
    pub fn new(field: RuleField, operator: RuleOperator, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    Country,
    Device,
    Os,
    Browser,
    Language,
    Referrer,
    QueryParam,
    Date,
    Time,
    DayOfWeek,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    In,
    NotIn,
    StartsWith,
    EndsWith,
    Before,
    After,
    Between,
    #[serde(other)]
    Unknown,
}

/// How a rule combines its conditions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleMatch {
    #[default]
    All,
    Any,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRule {
    pub destination_url: String,
    pub conditions: Vec<RuleCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<RuleMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<RuleCondition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<RuleMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn condition_serializes_snake_case() {
        let cond = RuleCondition::new(RuleField::DayOfWeek, RuleOperator::NotIn, json!(["sat", "sun"]));
        assert_eq!(
            serde_json::to_value(&cond).unwrap(),
            json!({"field": "day_of_week", "operator": "not_in", "value": ["sat", "sun"]})
        );
    }

    #[test]
    fn rule_defaults_when_fields_are_missing() {
        let rule: LinkRule = serde_json::from_value(json!({
            "id": "rul_1",
            "destinationUrl": "https://example.com/de"
        }))
        .unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.match_mode, RuleMatch::All);
        assert!(rule.conditions.is_empty());
    }

    #[test]
    fn unlisted_field_and_operator_decode_as_unknown() {
        let cond: RuleCondition = serde_json::from_value(json!({
            "field": "ip_range",
            "operator": "matches_cidr",
            "value": "10.0.0.0/8"
        }))
        .unwrap();
        assert_eq!(cond.field, RuleField::Unknown);
        assert_eq!(cond.operator, RuleOperator::Unknown);
        assert_eq!(cond.value, "10.0.0.0/8");
    }
}
