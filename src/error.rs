use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Limit value {requested} is outside the valid range: from 1 to {total}")]
    LimitOutOfRange { requested: usize, total: usize },

    #[error("Malformed item: {0}")]
    MalformedItem(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Errors caused by what the user typed rather than by the remote feed.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidSource(_) | Error::LimitOutOfRange { .. } | Error::Config(_)
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidSource(_) => "INVALID_SOURCE",
            Error::FetchFailed(_) => "FETCH_FAILED",
            Error::LimitOutOfRange { .. } => "LIMIT_OUT_OF_RANGE",
            Error::MalformedItem(_) => "MALFORMED_ITEM",
            Error::Template(_) => "TEMPLATE",
            Error::Config(_) => "CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}
