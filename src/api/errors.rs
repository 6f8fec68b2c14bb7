use thiserror::Error;

/// Failures of a call to the library or blog API.
///
/// Every variant carries the single message shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("A network error occurred: {0}")]
    Transport(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
