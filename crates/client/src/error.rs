// crates/client/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's error text when present.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response with `success: false` or no data.
    #[error("{0}")]
    Api(String),

    /// The filters lack a user id; no request was sent.
    #[error("Filters are incomplete: user_id is required")]
    IncompleteFilters,
}

pub type ClientResult<T> = Result<T, ClientError>;
