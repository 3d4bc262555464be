//! Session-token persistence collaborators.

pub mod json_token;

use thiserror::Error;

pub use json_token::JsonTokenStore;

pub type Result<T> = std::result::Result<T, TokenError>;

/// Error type that captures token persistence failures.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no usable data directory for the token store")]
    NoDataDir,
}

/// Abstraction over wherever the session credential lives. Process-wide
/// and single-writer: only the final registration effect (or an equivalent
/// login flow) calls `save`.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<()>;
    fn load(&self) -> Result<Option<String>>;
    fn clear(&self) -> Result<()>;
}
