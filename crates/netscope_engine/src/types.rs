use std::fmt;

use crate::ScrapeDocument;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ScrapeCompleted {
        request_id: RequestId,
        url: String,
        result: Result<ScrapeDocument, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidBaseUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidBaseUrl => write!(f, "invalid service url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
