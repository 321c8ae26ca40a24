//! Error types for the fracture assistant.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FractureError {
    #[error("{0}")]
    Validation(String),

    #[error("Remote analysis failed: {0}")]
    Remote(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FractureError {
    /// HTTP status the daemon maps this error to.
    pub fn status_code(&self) -> u16 {
        match self {
            FractureError::Validation(_) => 400,
            FractureError::Remote(_) => 502,
            FractureError::Timeout(_) => 504,
            FractureError::Report(_) => 500,
            FractureError::Chat(_) => 400,
            FractureError::Io(_) => 500,
            FractureError::Json(_) => 400,
            FractureError::Internal(_) => 500,
        }
    }
}
