use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid API endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Philter API returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
