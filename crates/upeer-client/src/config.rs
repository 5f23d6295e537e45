use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

/// Client configuration, read from the environment with local-dev
/// defaults. The binary loads `.env` first via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST base, e.g. `http://localhost:8001`.
    pub api_url: String,
    /// WebSocket base, e.g. `ws://localhost:8001`.
    pub ws_url: String,
    /// Where the session token is persisted.
    pub token_path: PathBuf,
    /// Chat poll period.
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url =
            std::env::var("UPEER_API_URL").unwrap_or_else(|_| "http://localhost:8001".into());
        let ws_url =
            std::env::var("UPEER_WS_URL").unwrap_or_else(|_| "ws://localhost:8001".into());
        let token_path = std::env::var("UPEER_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("upeer.token"));
        let poll_secs: u64 = std::env::var("UPEER_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .map_err(|e| {
                ClientError::Precondition(format!("invalid UPEER_POLL_INTERVAL_SECS: {e}"))
            })?;

        Ok(Self {
            api_url,
            ws_url,
            token_path,
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}
