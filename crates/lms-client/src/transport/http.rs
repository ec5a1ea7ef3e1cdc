use super::hooks::{self, RequestHook, ResponseHook};
use super::{ApiRequest, MultipartBody, RawResponse, RequestBody, RequestRecord, Transport};
use crate::error::{LmsError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Everything needed to construct an [`HttpTransport`].
#[derive(Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
    request_hooks: Vec<RequestHook>,
    response_hooks: Vec<ResponseHook>,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            headers: Vec::new(),
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
        }
    }

    /// Adds a header sent with every request, replacing one of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_bearer_token(self, access_token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", access_token))
    }

    /// Appends an observer called before each request is sent.
    pub fn on_request(mut self, hook: RequestHook) -> Self {
        self.request_hooks.push(hook);
        self
    }

    /// Appends an observer called after each response body is read.
    pub fn on_response(mut self, hook: ResponseHook) -> Self {
        self.response_hooks.push(hook);
        self
    }

    /// Installs the request/response log lines.
    pub fn with_logging(self) -> Self {
        self.on_request(hooks::logging_request_hook())
            .on_response(hooks::logging_response_hook())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("TransportConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("headers", &header_names)
            .field("request_hooks", &self.request_hooks.len())
            .field("response_hooks", &self.response_hooks.len())
            .finish()
    }
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a new transport with configuration
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LmsError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn build_request(&self, request: ApiRequest, url: &str) -> Result<Request> {
        let method_name = request.method.to_string();
        let transport_error = |source| LmsError::Transport {
            method: method_name.clone(),
            url: url.to_string(),
            source,
        };

        let mut builder = self.client.request(request.method, url);
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(body) => {
                builder.multipart(into_form(body).map_err(transport_error)?)
            }
        };

        builder.build().map_err(transport_error)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = super::join_url(&self.config.base_url, &request.path);
        let http_request = self.build_request(request, &url)?;
        let record = RequestRecord::from_request(&http_request);

        hooks::run_request_hooks(&self.config.request_hooks, &record);

        let transport_error = |source| LmsError::Transport {
            method: record.method.clone(),
            url: record.url.clone(),
            source,
        };

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!("{} -> {} ({} bytes)", record, status, body.len());

        let raw = RawResponse::new(status, body.to_vec(), record).with_headers(headers);
        hooks::run_response_hooks(&self.config.response_hooks, &raw);

        Ok(raw)
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

fn into_form(body: MultipartBody) -> reqwest::Result<Form> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    for file in body.files {
        let mime = super::content_type_for(&file.file_name);
        let part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(mime)?;
        form = form.part(file.field_name, part);
    }
    Ok(form)
}

impl RequestRecord {
    fn from_request(request: &Request) -> Self {
        Self {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
            body: request
                .body()
                .and_then(|body| body.as_bytes())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    fn transport() -> HttpTransport {
        let config = TransportConfig::new("http://localhost:8000", Duration::from_secs(5))
            .with_bearer_token("access-123");
        HttpTransport::new(config).unwrap()
    }

    #[test]
    fn test_with_header_replaces_same_name() {
        let config = TransportConfig::new("http://localhost:8000", Duration::from_secs(1))
            .with_header("authorization", "Bearer old")
            .with_bearer_token("new");

        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.header("Authorization"), Some("Bearer new"));
    }

    #[test]
    fn test_debug_does_not_print_header_values() {
        let config = TransportConfig::new("http://localhost:8000", Duration::from_secs(1))
            .with_bearer_token("secret-token");
        let debug = format!("{:?}", config);

        assert!(debug.contains("Authorization"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_built_request_carries_auth_query_and_json() {
        let transport = transport();
        let request = ApiRequest::new(Method::PATCH, "/api/v1/courses/42")
            .with_query(&[("userId".to_string(), "u-1".to_string())])
            .with_json(json!({"title": "Rust"}));

        let url = super::super::join_url(transport.base_url(), &request.path);
        let built = transport.build_request(request, &url).unwrap();
        let record = RequestRecord::from_request(&built);

        assert_eq!(record.method, "PATCH");
        assert_eq!(
            record.url,
            "http://localhost:8000/api/v1/courses/42?userId=u-1"
        );
        assert!(
            record
                .headers
                .contains(&("authorization".to_string(), "Bearer access-123".to_string()))
        );
        assert_eq!(record.body.as_deref(), Some(r#"{"title":"Rust"}"#));
    }

    #[test]
    fn test_multipart_body_is_not_recorded() {
        let transport = transport();
        let body = MultipartBody {
            fields: vec![("filename".into(), "image.png".into())],
            files: vec![super::super::FilePart {
                field_name: "upload_file".into(),
                file_name: "image.png".into(),
                content: vec![1, 2, 3],
            }],
        };
        let request = ApiRequest::new(Method::POST, "/api/v1/files").with_multipart(body);

        let url = super::super::join_url(transport.base_url(), &request.path);
        let built = transport.build_request(request, &url).unwrap();
        let record = RequestRecord::from_request(&built);

        assert_eq!(record.body, None);
        assert!(
            record
                .headers
                .iter()
                .any(|(name, value)| name == "content-type"
                    && value.starts_with("multipart/form-data"))
        );
    }
}
