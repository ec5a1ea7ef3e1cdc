//! Authenticated sessions, one per credential.
//!
//! [`SessionCache`] logs a credential in the first time it is asked for and
//! hands out the same [`HttpTransport`] for every later request with an equal
//! credential. Each credential owns a [`OnceCell`] slot, so concurrent first
//! requests for the same credential wait on a single login instead of racing.
//!
//! Sessions are never expired. A token the server stops accepting shows up
//! as a 401 on the next request; [`SessionCache::invalidate`] drops the
//! session so the following request logs in again.

use crate::clients::Authenticator;
use crate::error::Result;
use crate::schema::{CreateUserRequest, LoginRequest};
use crate::transport::{HttpTransport, TransportConfig};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Email and password of a test user. Compared and hashed by value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn login_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl From<&CreateUserRequest> for Credential {
    fn from(request: &CreateUserRequest) -> Self {
        Self::new(request.email.clone(), request.password.clone())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

type Slot = Arc<OnceCell<Arc<HttpTransport>>>;

/// Get-or-login store of authenticated transports.
pub struct SessionCache {
    authenticator: Arc<dyn Authenticator>,
    transport_config: TransportConfig,
    sessions: Mutex<HashMap<Credential, Slot>>,
}

impl SessionCache {
    /// `transport_config` is the template for every session; each one adds
    /// its own `Authorization` header.
    pub fn new(authenticator: Arc<dyn Authenticator>, transport_config: TransportConfig) -> Self {
        Self {
            authenticator,
            transport_config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Transport authenticated as `credential`, logging in on first use.
    ///
    /// A failed login is returned to the caller and leaves nothing cached.
    pub async fn get_private_transport(&self, credential: &Credential) -> Result<Arc<HttpTransport>> {
        let slot = self
            .sessions()
            .entry(credential.clone())
            .or_default()
            .clone();

        let initialised = slot
            .get_or_try_init(|| async {
                info!("Opening session for {}", credential.email);
                let login = self
                    .authenticator
                    .login(&credential.login_request())
                    .await?;
                let config = self
                    .transport_config
                    .clone()
                    .with_bearer_token(&login.token.access_token);
                HttpTransport::new(config).map(Arc::new)
            })
            .await;

        let transport = match initialised {
            Ok(transport) => transport,
            Err(e) => {
                self.evict_empty_slot(credential, &slot);
                return Err(e);
            }
        };

        debug!("Using session for {}", credential.email);
        Ok(transport.clone())
    }

    /// Forgets the session for `credential`. Returns whether one existed.
    pub fn invalidate(&self, credential: &Credential) -> bool {
        let removed = self.sessions().remove(credential);
        let existed = removed.is_some_and(|slot| slot.initialized());
        if existed {
            info!("Invalidated session for {}", credential.email);
        }
        existed
    }

    /// Number of logged-in sessions.
    pub fn len(&self) -> usize {
        self.sessions()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops `slot` if it is still the one mapped to `credential` and no
    /// concurrent caller has since logged it in.
    fn evict_empty_slot(&self, credential: &Credential, slot: &Slot) {
        let mut sessions = self.sessions();
        let stale = sessions
            .get(credential)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if stale {
            sessions.remove(credential);
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Credential, Slot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("base_url", &self.transport_config.base_url)
            .field("sessions", &self.len())
            .finish()
    }
}
