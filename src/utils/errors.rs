use std::fmt;

use thiserror::Error;

/// Errors surfaced by the timeline flow. Network and decode failures come from
/// the remote source; the rest are raised by the controller itself.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("network error (status {}): {cause}", status_label(.status_code))]
    Network {
        status_code: Option<u16>,
        cause: String,
    },
    #[error("unable to decode timeline payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("timeline controller has shut down")]
    ControllerClosed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("no item to anchor the next page on")]
    NoAnchor,
    #[error("a page older than {cursor} is already being fetched")]
    InFlight { cursor: u64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("post body is empty")]
    Empty,
    #[error("post body has {len} characters, the limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// Cache failures. These never reach the presentation layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0} cannot be sent as an authorization header")]
    InvalidToken(&'static str),
}

/// Flat error category handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    Pagination,
    Compose,
    Closed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Pagination => write!(f, "pagination"),
            ErrorKind::Compose => write!(f, "compose"),
            ErrorKind::Closed => write!(f, "closed"),
        }
    }
}

impl TimelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimelineError::Network { .. } => ErrorKind::Network,
            TimelineError::Decode(_) => ErrorKind::Decode,
            TimelineError::Pagination(_) => ErrorKind::Pagination,
            TimelineError::Compose(_) => ErrorKind::Compose,
            TimelineError::ControllerClosed => ErrorKind::Closed,
        }
    }
}

impl From<reqwest::Error> for TimelineError {
    fn from(e: reqwest::Error) -> Self {
        TimelineError::Network {
            status_code: e.status().map(|s| s.as_u16()),
            cause: e.to_string(),
        }
    }
}

fn status_label(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}
