//! Routing rules under `/api/link/{id}/rules`.

use serde::Serialize;

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{CreateLinkRule, LinkRule, UpdateLinkRule};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderRules<'a> {
    rule_ids: &'a [&'a str],
}

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_link_rules(&self, link_id: &str) -> Result<Vec<LinkRule>> {
        self.call(Endpoint::get(&["api", "link", link_id, "rules"]))
    }

    pub fn get_link_rule(&self, link_id: &str, rule_id: &str) -> Result<LinkRule> {
        self.call(Endpoint::get(&["api", "link", link_id, "rules", rule_id]))
    }

    pub fn create_link_rule(&self, link_id: &str, input: &CreateLinkRule) -> Result<LinkRule> {
        self.call(Endpoint::post(&["api", "link", link_id, "rules"]).json(input)?)
    }

    pub fn update_link_rule(
        &self,
        link_id: &str,
        rule_id: &str,
        input: &UpdateLinkRule,
    ) -> Result<LinkRule> {
        self.call(Endpoint::patch(&["api", "link", link_id, "rules", rule_id]).json(input)?)
    }

    pub fn delete_link_rule(&self, link_id: &str, rule_id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "link", link_id, "rules", rule_id]))
    }

    pub fn delete_all_link_rules(&self, link_id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "link", link_id, "rules"]))
    }

    /// Set evaluation order; `rule_ids[0]` gets the highest priority.
    pub fn reorder_link_rules(&self, link_id: &str, rule_ids: &[&str]) -> Result<Vec<LinkRule>> {
        let body = ReorderRules { rule_ids };
        self.call(Endpoint::put(&["api", "link", link_id, "rules", "reorder"]).json(&body)?)
    }
}
