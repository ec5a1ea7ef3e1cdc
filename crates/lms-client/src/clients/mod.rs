//! Resource clients.
//!
//! Every client holds a shared [`Transport`] and offers two flavours of each
//! operation: `*_api` methods return the [`RawResponse`] whatever its status,
//! the plain methods require a 2xx status and parse the body into the typed
//! model.

mod authentication;
mod courses;
mod exercises;
mod files;
mod users;

pub use authentication::{AuthenticationClient, Authenticator};
pub use courses::CoursesClient;
pub use exercises::ExercisesClient;
pub use files::FilesClient;
pub use users::{PrivateUsersClient, PublicUsersClient};

use crate::error::{LmsError, Result};
use crate::schema;
use crate::session::{Credential, SessionCache};
use crate::transport::{HttpTransport, RawResponse, Transport, TransportConfig};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Requires a 2xx status, then parses the body into `T`.
pub(crate) fn parse_response<T>(response: &RawResponse) -> Result<T>
where
    T: DeserializeOwned + JsonSchema,
{
    if !response.is_success() {
        return Err(LmsError::api(response));
    }
    schema::parse_json(response.body())
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Flattens a query model into `(wire name, value)` pairs, dropping nulls.
pub(crate) fn to_query<T: Serialize>(value: &T) -> Result<Vec<(String, String)>> {
    let Value::Object(fields) = to_json(value)? else {
        return Err(LmsError::Config(
            "query parameters must serialise to a JSON object".to_string(),
        ));
    };
    Ok(fields
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}

/// Hands out resource clients that share one public transport and one
/// session cache.
#[derive(Clone)]
pub struct LmsClients {
    public: Arc<dyn Transport>,
    sessions: Arc<SessionCache>,
}

impl LmsClients {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let public: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.clone())?);
        let authenticator = Arc::new(AuthenticationClient::new(public.clone()));
        let sessions = Arc::new(SessionCache::new(authenticator, config));
        Ok(Self { public, sessions })
    }

    /// Builds the factory around an existing transport and cache.
    pub fn from_parts(public: Arc<dyn Transport>, sessions: Arc<SessionCache>) -> Self {
        Self { public, sessions }
    }

    pub fn base_url(&self) -> &str {
        self.public.base_url()
    }

    pub fn sessions(&self) -> &SessionCache {
        &self.sessions
    }

    pub fn authentication(&self) -> AuthenticationClient {
        AuthenticationClient::new(self.public.clone())
    }

    pub fn public_users(&self) -> PublicUsersClient {
        PublicUsersClient::new(self.public.clone())
    }

    pub async fn private_users(&self, credential: &Credential) -> Result<PrivateUsersClient> {
        Ok(PrivateUsersClient::new(self.session(credential).await?))
    }

    pub async fn courses(&self, credential: &Credential) -> Result<CoursesClient> {
        Ok(CoursesClient::new(self.session(credential).await?))
    }

    pub async fn exercises(&self, credential: &Credential) -> Result<ExercisesClient> {
        Ok(ExercisesClient::new(self.session(credential).await?))
    }

    pub async fn files(&self, credential: &Credential) -> Result<FilesClient> {
        Ok(FilesClient::new(self.session(credential).await?))
    }

    async fn session(&self, credential: &Credential) -> Result<Arc<dyn Transport>> {
        let transport: Arc<dyn Transport> = self.sessions.get_private_transport(credential).await?;
        Ok(transport)
    }
}

impl std::fmt::Debug for LmsClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmsClients")
            .field("base_url", &self.base_url())
            .field("sessions", &self.sessions.len())
            .finish()
    }
}
