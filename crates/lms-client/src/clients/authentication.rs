use super::{parse_response, to_json};
use crate::error::{LmsError, Result};
use crate::schema::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

const LOGIN_PATH: &str = "/api/v1/authentication/login";
const REFRESH_PATH: &str = "/api/v1/authentication/refresh";

/// Something that can exchange credentials for a token.
///
/// The session cache depends on this rather than on
/// [`AuthenticationClient`] so tests can count logins.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
}

/// Client for `/api/v1/authentication`.
#[derive(Clone)]
pub struct AuthenticationClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for AuthenticationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl AuthenticationClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn login_api(&self, request: &LoginRequest) -> Result<RawResponse> {
        self.transport.post_json(LOGIN_PATH, to_json(request)?).await
    }

    pub async fn refresh_api(&self, request: &RefreshRequest) -> Result<RawResponse> {
        self.transport.post_json(REFRESH_PATH, to_json(request)?).await
    }

    /// Logs in; a non-2xx answer is an [`LmsError::Authentication`].
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        info!("Logging in as {}", request.email);
        let response = self.login_api(request).await?;
        authenticated(&response)
    }

    pub async fn refresh(&self, request: &RefreshRequest) -> Result<RefreshResponse> {
        debug!("Refreshing access token");
        let response = self.refresh_api(request).await?;
        authenticated(&response)
    }
}

fn authenticated(response: &RawResponse) -> Result<LoginResponse> {
    if !response.is_success() {
        return Err(LmsError::Authentication {
            status: response.status(),
            body: response.text().into_owned(),
        });
    }
    parse_response(response)
}

#[async_trait]
impl Authenticator for AuthenticationClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        AuthenticationClient::login(self, request).await
    }
}
