//! In-memory transport for exercising clients without a server.

use crate::error::Result;
use crate::transport::{ApiRequest, RawResponse, RequestBody, RequestRecord, Transport, join_url};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Transport that answers with pre-scripted responses, in order, and
/// records every request it was given.
#[derive(Debug, Clone)]
pub struct MockTransport {
    base_url: String,
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<(StatusCode, String)>,
    requests: Vec<ApiRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_base_url("http://lms.test")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queues a JSON response.
    pub fn push_json(&self, status: StatusCode, body: Value) -> &Self {
        self.push_text(status, &body.to_string())
    }

    /// Queues a response with an arbitrary body.
    pub fn push_text(&self, status: StatusCode, body: &str) -> &Self {
        self.state()
            .responses
            .push_back((status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, request: &ApiRequest) -> RequestRecord {
        let mut url = join_url(&self.base_url, &request.path);
        if !request.query.is_empty() {
            let query: Vec<String> = request
                .query
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            url = format!("{}?{}", url, query.join("&"));
        }
        let body = match &request.body {
            RequestBody::Json(json) => Some(json.to_string()),
            RequestBody::Empty | RequestBody::Multipart(_) => None,
        };
        RequestRecord {
            method: request.method.to_string(),
            url,
            headers: Vec::new(),
            body,
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let record = self.record(&request);
        let mut state = self.state();
        state.requests.push(request);
        let (status, body) = state.responses.pop_front().unwrap_or_else(|| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"detail":"no scripted response"}"#.to_string(),
            )
        });
        Ok(RawResponse::new(status, body, record))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
