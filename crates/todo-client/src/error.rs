use reqwest::StatusCode;
use thiserror::Error;
use todo_domain::ValidationError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected locally; no request was sent.
    #[error("Please fill in both the title and description: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Server { status: StatusCode, message: String },
}
