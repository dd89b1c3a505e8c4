use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the credentials (HTTP 400 on login).
    #[error("{0}")]
    InvalidCredentials(String),

    /// No stored session to authenticate the request with.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Any other non-success response.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
