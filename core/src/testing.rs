//! Recording transport shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::ShortlinkClient;
use crate::config::{ClientConfig, ClientOptions};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse, Transport};

pub(crate) const BASE_URL: &str = "http://localhost:3000";
pub(crate) const API_KEY: &str = "sl_test_abc123";

pub(crate) const LINK_JSON: &str = r#"{
    "id": "lnk_1",
    "key": "promo",
    "url": "https://example.com/spring",
    "shortLink": "https://sho.rt/promo",
    "tags": ["spring"],
    "clicks": 12,
    "createdAt": "2024-05-01T10:00:00Z",
    "updatedAt": "2024-05-02T10:00:00Z"
}"#;

/// Replays canned responses in order and keeps every request it sees.
/// Once the queue is empty it answers `200 {}`.
pub(crate) struct Recorder {
    replies: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(status: u16, body: &str) -> Self {
        let recorder = Self::new();
        recorder.push(status, body);
        recorder
    }

    pub(crate) fn push(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub(crate) fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_body(&self) -> serde_json::Value {
        let body = self.last().body.expect("request had no body");
        serde_json::from_str(&body).unwrap()
    }
}

impl Transport for Recorder {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| HttpResponse::new(200, "{}")))
    }
}

pub(crate) fn client(recorder: &Recorder) -> ShortlinkClient<&Recorder> {
    let config =
        ClientConfig::validate(ClientOptions::new(API_KEY).api_url(BASE_URL)).unwrap();
    ShortlinkClient::with_transport(config, recorder)
}

pub(crate) fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}
