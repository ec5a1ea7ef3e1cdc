//! Low-level HTTP issuing for the LMS API.
//!
//! [`Transport`] is the seam every domain client is built on. [`HttpTransport`]
//! is the reqwest implementation; [`crate::testing::MockTransport`] replaces it
//! in unit tests.
//!
//! Transports never interpret status codes: a 404 or 422 comes back as an
//! ordinary [`RawResponse`]. Only failures below HTTP (connection refused,
//! timeout) surface as [`crate::LmsError::Transport`].

pub mod curl;
mod hooks;
mod http;

pub use hooks::{
    CurlRecorder, RequestHook, ResponseHook, logging_request_hook, logging_response_hook,
};
pub use http::{HttpTransport, TransportConfig};

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// A request relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_query(mut self, query: &[(String, String)]) -> Self {
        self.query = query.to_vec();
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

/// Form fields plus file parts for a `multipart/form-data` upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, PartialEq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}

/// What was actually put on the wire, kept for hooks and error reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// `None` when the body was empty or streamed (multipart).
    pub body: Option<String>,
}

impl fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// An HTTP response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    request: RequestRecord,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>, request: RequestRecord) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            request,
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decodes the body without any schema checks.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The request that produced this response.
    pub fn request(&self) -> &RequestRecord {
        &self.request
    }
}

/// Issues requests against one configured base URL.
///
/// Implementations must be safe to share between tasks: nothing about a
/// request may leak into the next one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;

    fn base_url(&self) -> &str;

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<RawResponse> {
        self.send(ApiRequest::new(Method::GET, path).with_query(query))
            .await
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<RawResponse> {
        self.send(ApiRequest::new(Method::POST, path).with_json(body))
            .await
    }

    async fn post_multipart(&self, path: &str, body: MultipartBody) -> Result<RawResponse> {
        self.send(ApiRequest::new(Method::POST, path).with_multipart(body))
            .await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<RawResponse> {
        self.send(ApiRequest::new(Method::PATCH, path).with_json(body))
            .await
    }

    async fn delete(&self, path: &str) -> Result<RawResponse> {
        self.send(ApiRequest::new(Method::DELETE, path)).await
    }
}

/// Joins a base URL and a path with exactly one slash between them.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Detect content type from file extension
pub(crate) fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
