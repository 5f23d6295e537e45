use std::sync::{Arc, Mutex};

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use upeer_types::api::ApiErrorBody;

use crate::error::ClientError;
use crate::token::TokenStore;

/// Auth-failure reasons that mean the credential itself is bad. Anything
/// else on a 401/403 (e.g. "You are not a member of this group") is a
/// normal API error and passes through to the caller.
const AUTH_FAILURE_REASONS: [&str; 3] =
    ["Token has expired", "Invalid token", "Authentication required"];

/// Emitted when the gateway tears a session down centrally.
#[derive(Debug, Clone)]
pub struct ForcedLogout {
    pub reason: String,
}

/// The single HTTP client every resource service goes through.
///
/// The token is read from the store fresh on each request, never cached at
/// construction time: login and logout may change it between requests.
/// Recognized auth failures clear the token and emit one [`ForcedLogout`]
/// signal, so individual services never special-case authentication.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    auth_tx: broadcast::Sender<ForcedLogout>,
    // Serializes the clear-and-signal path, so concurrent rejections of
    // the same stored token still produce exactly one signal.
    auth_guard: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            auth_tx,
            auth_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Subscribe to forced-logout signals. The session manager listens on
    /// this; views never need to.
    pub fn subscribe_forced_logout(&self) -> broadcast::Receiver<ForcedLogout> {
        self.auth_tx.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.send(self.http.get(self.url(path))).await?;
        Ok(resp.json().await?)
    }

    /// GET with query parameters. Callers only push parameters that are
    /// actually present; an absent filter must not appear in the query
    /// string at all.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self.send(self.http.get(self.url(path)).query(query)).await?;
        Ok(resp.json().await?)
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(resp.json().await?)
    }

    /// POST without a body, for endpoints like group join.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.send(self.http.post(self.url(path))).await?;
        Ok(resp.json().await?)
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.send(self.http.put(self.url(path)).json(body)).await?;
        Ok(resp.json().await?)
    }

    /// DELETE, ignoring any response body (the backend answers 204 or a
    /// confirmation envelope).
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let req = match self.tokens.load() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;
        self.check(resp).await
    }

    async fn check(&self, resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        let auth_status =
            status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
        if auth_status && AUTH_FAILURE_REASONS.contains(&message.as_str()) {
            // Clear-and-signal only while a token is actually stored: the
            // analog of not redirecting when already at the login page.
            let _guard = self.auth_guard.lock().expect("auth guard poisoned");
            if self.tokens.load().is_some() {
                warn!("session rejected by server ({}), forcing logout", message);
                self.tokens.clear()?;
                let _ = self.auth_tx.send(ForcedLogout {
                    reason: message.clone(),
                });
            } else {
                debug!("auth failure with no stored token: {}", message);
            }
            return Err(ClientError::Auth(message));
        }

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
