//! Custom domains under `/api/domains`.

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{CreateDomain, Domain, ListParams, Paginated, UpdateDomain};

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_domains(&self, params: ListParams) -> Result<Paginated<Domain>> {
        self.call(params.apply(Endpoint::get(&["api", "domains"])))
    }

    pub fn get_domain(&self, id: &str) -> Result<Domain> {
        self.call(Endpoint::get(&["api", "domains", id]))
    }

    /// Register a domain. It starts out `pending` with the DNS records to
    /// publish listed in `dns_records`.
    pub fn add_domain(&self, input: &CreateDomain) -> Result<Domain> {
        self.call(Endpoint::post(&["api", "domains"]).json(input)?)
    }

    pub fn update_domain(&self, id: &str, input: &UpdateDomain) -> Result<Domain> {
        self.call(Endpoint::patch(&["api", "domains", id]).json(input)?)
    }

    pub fn delete_domain(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "domains", id]))
    }

    /// Ask the server to re-check DNS and return the resulting status.
    pub fn verify_domain(&self, id: &str) -> Result<Domain> {
        self.call(Endpoint::post(&["api", "domains", id, "verify"]))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::http::HttpMethod;
    use crate::testing::{client, url, Recorder};
    use crate::types::DomainStatus;

    use super::*;

    const DOMAIN_JSON: &str = r#"{
        "id": "dom_1",
        "domain": "go.example.com",
        "status": "pending",
        "dnsRecords": [{"type": "CNAME", "name": "go", "value": "cname.shortlink.io"}]
    }"#;

    #[test]
    fn add_domain_posts_hostname() {
        let rec = Recorder::replying(201, DOMAIN_JSON);
        let input = CreateDomain {
            domain: "go.example.com".to_string(),
            not_found_url: Some("https://example.com/404".to_string()),
            ..CreateDomain::default()
        };
        let domain = client(&rec).add_domain(&input).unwrap();
        assert_eq!(domain.status, DomainStatus::Pending);
        assert_eq!(rec.last().url, url("/api/domains"));
        assert_eq!(
            rec.last_body(),
            json!({"domain": "go.example.com", "notFoundUrl": "https://example.com/404"})
        );
    }

    #[test]
    fn verify_domain_relays_new_status() {
        let rec = Recorder::replying(
            200,
            r#"{"id":"dom_1","domain":"go.example.com","status":"verified","verifiedAt":"2024-06-01T08:00:00Z"}"#,
        );
        let domain = client(&rec).verify_domain("dom_1").unwrap();
        assert_eq!(domain.status, DomainStatus::Verified);
        assert!(domain.verified_at.is_some());

        let req = rec.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, url("/api/domains/dom_1/verify"));
        assert!(req.body.is_none());
    }

    #[test]
    fn update_and_delete_by_id() {
        let rec = Recorder::replying(200, DOMAIN_JSON);
        let c = client(&rec);
        let update = UpdateDomain {
            redirect_url: Some("https://example.com".to_string()),
            ..UpdateDomain::default()
        };
        c.update_domain("dom_1", &update).unwrap();
        assert_eq!(rec.last().method, HttpMethod::Patch);
        assert_eq!(rec.last_body(), json!({"redirectUrl": "https://example.com"}));

        c.delete_domain("dom_1").unwrap();
        assert_eq!(rec.last().method, HttpMethod::Delete);
        assert_eq!(rec.last().url, url("/api/domains/dom_1"));
    }
}
