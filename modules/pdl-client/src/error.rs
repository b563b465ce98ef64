use thiserror::Error;

pub type Result<T> = std::result::Result<T, PdlError>;

#[derive(Debug, Error)]
pub enum PdlError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PdlError {
    fn from(err: reqwest::Error) -> Self {
        PdlError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for PdlError {
    fn from(err: serde_json::Error) -> Self {
        PdlError::Parse(err.to_string())
    }
}
