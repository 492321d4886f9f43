//! Webhook management under `/api/manager/webhook`.
//!
//! Enabling, disabling and secret rotation are server-side transitions; these
//! methods trigger them and return the webhook as the server now sees it.

use crate::client::ShortlinkClient;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::types::{CreateWebhook, ListParams, Paginated, UpdateWebhook, Webhook, WebhookTestResult};

impl<T: Transport> ShortlinkClient<T> {
    pub fn list_webhooks(&self, params: ListParams) -> Result<Paginated<Webhook>> {
        self.call(params.apply(Endpoint::get(&["api", "manager", "webhook"])))
    }

    pub fn get_webhook(&self, id: &str) -> Result<Webhook> {
        self.call(Endpoint::get(&["api", "manager", "webhook", id]))
    }

    pub fn create_webhook(&self, input: &CreateWebhook) -> Result<Webhook> {
        self.call(Endpoint::post(&["api", "manager", "webhook"]).json(input)?)
    }

    pub fn update_webhook(&self, id: &str, input: &UpdateWebhook) -> Result<Webhook> {
        self.call(Endpoint::patch(&["api", "manager", "webhook", id]).json(input)?)
    }

    pub fn delete_webhook(&self, id: &str) -> Result<()> {
        self.call_discarding(Endpoint::delete(&["api", "manager", "webhook", id]))
    }

    pub fn enable_webhook(&self, id: &str) -> Result<Webhook> {
        self.call(Endpoint::post(&["api", "manager", "webhook", id, "enable"]))
    }

    pub fn disable_webhook(&self, id: &str) -> Result<Webhook> {
        self.call(Endpoint::post(&["api", "manager", "webhook", id, "disable"]))
    }

    /// Ask the server to send a sample delivery to the webhook URL.
    pub fn test_webhook(&self, id: &str) -> Result<WebhookTestResult> {
        self.call(Endpoint::post(&["api", "manager", "webhook", id, "test"]))
    }

    /// Issue a new signing secret; the old one stops working immediately.
    pub fn rotate_webhook_secret(&self, id: &str) -> Result<Webhook> {
        self.call(Endpoint::post(&["api", "manager", "webhook", id, "rotate-secret"]))
    }
}
