use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tokio::sync::watch;
use tracing::{debug, info};

use upeer_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest, UpdateProfileRequest};
use upeer_types::models::User;

use crate::error::ClientError;
use crate::gateway::ApiClient;

/// Token lifetime the backend issues. Used as a fallback when a freshly
/// returned token cannot be decoded.
const TOKEN_LIFETIME: Duration = Duration::days(1);

/// In-memory identity of the authenticated user, derived from the token
/// claims or the login response. Never persisted; only the raw token is.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
    /// Absent when rehydrated from a stored token: the JWT carries no
    /// name claim.
    pub name: Option<String>,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Startup, before `load_session` has resolved.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(s) => Some(s),
            _ => None,
        }
    }
}

/// Owns the auth lifecycle and publishes the current state through a watch
/// channel, so consumers observe transitions explicitly instead of reading
/// ambient global state.
pub struct SessionManager {
    api: ApiClient,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionManager {
    /// Also spawns a listener for the gateway's forced-logout signal: an
    /// auth failure anywhere tears the session down exactly like `logout`.
    pub fn new(api: ApiClient) -> Self {
        let (tx, _) = watch::channel(SessionState::Loading);
        let state = Arc::new(tx);

        let mut forced = api.subscribe_forced_logout();
        let listener_state = state.clone();
        tokio::spawn(async move {
            while let Ok(signal) = forced.recv().await {
                info!("forced logout: {}", signal.reason);
                listener_state.send_modify(|s| {
                    if matches!(s, SessionState::Authenticated(_)) {
                        *s = SessionState::Unauthenticated;
                    }
                });
            }
        });

        Self { api, state }
    }

    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Rehydrate the session from the persisted token, without a server
    /// round-trip. An expired or undecodable token is discarded so no
    /// stale credential survives the call.
    pub fn load_session(&self) -> Result<SessionState, ClientError> {
        let next = match self.api.tokens().load() {
            None => SessionState::Unauthenticated,
            Some(token) => match decode_session(&token) {
                Ok(session) => SessionState::Authenticated(session),
                Err(e) => {
                    debug!("discarding stored token: {}", e);
                    self.api.tokens().clear()?;
                    SessionState::Unauthenticated
                }
            },
        };
        self.state.send_replace(next.clone());
        Ok(next)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self
            .api
            .post("auth/login/", &req)
            .await
            .map_err(|e| with_default_message(e, "Invalid credentials"))?;
        self.establish(resp)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let req = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: AuthResponse = self
            .api
            .post("auth/register/", &req)
            .await
            .map_err(|e| with_default_message(e, "An error occurred during registration"))?;
        self.establish(resp)
    }

    /// Persist the returned token and build the session from the returned
    /// user object. This and the claims path in `decode_session` must
    /// agree on field mapping.
    fn establish(&self, resp: AuthResponse) -> Result<Session, ClientError> {
        self.api.tokens().save(&resp.token)?;

        let expires_at =
            token_expiry(&resp.token).unwrap_or_else(|| Utc::now() + TOKEN_LIFETIME);
        let session = Session {
            user_id: resp.user.user_id,
            email: resp.user.email,
            name: Some(resp.user.name),
            is_admin: resp.user.is_admin,
            expires_at,
        };

        self.state
            .send_replace(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Idempotent: safe to call with no active session.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.api.tokens().clear()?;
        self.state.send_replace(SessionState::Unauthenticated);
        Ok(())
    }

    /// Shallow-merges the returned fields into the current session on
    /// success; failure leaves the session untouched.
    pub async fn update_profile(&self, name: &str, email: &str) -> Result<(), ClientError> {
        let req = UpdateProfileRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        let user: User = self
            .api
            .put("auth/profile/", &req)
            .await
            .map_err(|e| with_default_message(e, "Failed to update profile"))?;

        self.state.send_modify(|state| {
            if let SessionState::Authenticated(session) = state {
                session.name = Some(user.name.clone());
                session.email = user.email.clone();
            }
        });
        Ok(())
    }

    pub async fn profile(&self) -> Result<User, ClientError> {
        self.api.get("auth/profile/").await
    }
}

/// Decode claims without signature validation: the secret lives on the
/// server, the client only reads the payload. Expiry is still enforced.
fn decode_session(token: &str) -> Result<Session, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    // No expiry leeway: a token past its `exp` is dead, not almost-dead.
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    let claims = data.claims;
    Ok(Session {
        user_id: claims.user_id,
        email: claims.email,
        name: claims.name,
        is_admin: claims.is_admin,
        expires_at: DateTime::from_timestamp(claims.exp as i64, 0).unwrap_or_default(),
    })
}

fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    decode_session(token).ok().map(|s| s.expires_at)
}

/// Error bodies without a message get a path-specific human-readable one.
fn with_default_message(err: ClientError, default: &str) -> ClientError {
    match err {
        ClientError::Api { status, message } if message.is_empty() => ClientError::Api {
            status,
            message: default.to_string(),
        },
        other => other,
    }
}
