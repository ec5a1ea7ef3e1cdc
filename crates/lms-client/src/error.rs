use crate::transport::{RawResponse, RequestRecord};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LmsError {
    /// Connection refused, timeout, or any other failure below HTTP.
    #[error("HTTP request failed: {method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Login or refresh answered with a non-2xx status.
    #[error("Authentication failed: {status} - {body}")]
    Authentication { status: StatusCode, body: String },

    /// The response body does not match the typed model.
    #[error("Response does not match {model} at '{path}': {message}")]
    SchemaValidation {
        model: &'static str,
        path: String,
        message: String,
        body: String,
    },

    /// A typed operation received a non-2xx status.
    #[error("API error: {request} returned {status} - {body}")]
    Api {
        status: StatusCode,
        body: String,
        request: Box<RequestRecord>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LmsError {
    /// Builds an [`LmsError::Api`] from a response a typed operation rejected.
    pub fn api(response: &RawResponse) -> Self {
        Self::Api {
            status: response.status(),
            body: response.text().into_owned(),
            request: Box::new(response.request().clone()),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;
