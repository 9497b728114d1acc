use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HevyError {
    #[error("missing api key: set HEVY_API_KEY in your environment or .env file")]
    MissingApiKey,

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or unexpected response format")]
    InvalidResponse,

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),

    #[error("malformed workout record {}: {reason}", workout_id.as_deref().unwrap_or("<no id>"))]
    MalformedRecord {
        workout_id: Option<String>,
        reason: &'static str,
    },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl HevyError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> HevyError {
        let path = path.into();
        move |source| HevyError::Io { path, source }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request (400)")]
    InvalidRequest,

    #[error("invalid or missing api key (401)")]
    Unauthorized,

    #[error("resource not found (404)")]
    NotFound,

    #[error("rate limit exceeded (429)")]
    RateLimited,

    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}
