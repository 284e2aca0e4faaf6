//! Synnefo provider error types

use synsh_cloud::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynnefoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<SynnefoError> for ApiError {
    fn from(err: SynnefoError) -> Self {
        match err {
            SynnefoError::Http(e) => ApiError::Request(e.to_string()),
            SynnefoError::Status { status, url } => ApiError::Status { status, url },
            SynnefoError::Json(e) => ApiError::InvalidResponse(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SynnefoError>;
