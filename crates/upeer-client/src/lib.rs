pub mod config;
pub mod error;
pub mod gateway;
pub mod services;
pub mod session;
pub mod token;

pub use config::Config;
pub use error::ClientError;
pub use gateway::ApiClient;
pub use session::{Session, SessionManager, SessionState};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
