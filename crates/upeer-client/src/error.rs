use thiserror::Error;

/// Errors surfaced by the client layer.
///
/// `Auth` never needs per-view handling: by the time it is returned, the
/// gateway has already torn the session down centrally.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never reached the server or the response never arrived.
    /// Retryable at the caller's discretion; nothing retries automatically.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the credentials; the stored token has been
    /// cleared and a forced-logout signal emitted.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Any other non-success response, with the server's message verbatim.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed client-side before any request was issued.
    #[error("{0}")]
    Precondition(String),

    /// The persisted token could not be read or written.
    #[error("token storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Server-provided message for display, if there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
