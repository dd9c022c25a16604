//! In-memory transport for tests.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::Value;

use super::error::TransportError;
use super::http::{HttpRequest, RawResponse, Transport};

/// Records every request and replays queued replies in order.
///
/// With no reply queued it answers `200 {}`.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    received_at: Mutex<Vec<DateTime<Utc>>>,
    replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply_json(self, status: StatusCode, body: &Value) -> Self {
        let response = RawResponse::new(status).with_body(body.to_string());
        self.reply(Ok(response))
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.reply(Err(err))
    }

    pub(crate) fn reply(self, reply: Result<RawResponse, TransportError>) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn received_at(&self) -> Vec<DateTime<Utc>> {
        self.received_at.lock().clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        self.received_at.lock().push(Utc::now());
        let url = request.url.clone();
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(StatusCode::OK).with_body("{}")))
            .map(|response| response.with_url(url))
    }
}
