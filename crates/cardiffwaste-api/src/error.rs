use std::fmt;

use cardiffwaste_core::ConfigError;
use thiserror::Error;

/// The upstream call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    Token,
    Preflight,
    Collections,
    AddressSearch,
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStage::Token => write!(f, "token"),
            RequestStage::Preflight => write!(f, "preflight"),
            RequestStage::Collections => write!(f, "collections"),
            RequestStage::AddressSearch => write!(f, "address search"),
        }
    }
}

/// Errors returned by the Cardiff waste API client.
#[derive(Debug, Error)]
pub enum WasteError {
    /// The transport could not reach the endpoint.
    #[error("could not reach {stage} endpoint: {source}")]
    Connection {
        stage: RequestStage,
        #[source]
        source: reqwest::Error,
    },

    /// A request or response body read timed out. `subject` is the UPRN or
    /// search term the operation was working on.
    #[error("{stage} request timed out for {subject}")]
    Timeout {
        stage: RequestStage,
        subject: String,
    },

    /// Any other transport failure.
    #[error("HTTP error during {stage}: {source}")]
    Http {
        stage: RequestStage,
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("unexpected HTTP status {status} from {stage}")]
    UnexpectedStatus { stage: RequestStage, status: u16 },

    #[error("address search term must not be empty")]
    InvalidSearchTerm,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WasteError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, WasteError::Timeout { .. })
    }

    pub(crate) fn decode(context: impl Into<String>, reason: impl fmt::Display) -> Self {
        WasteError::Decode {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}

/// Sorts a `reqwest` failure into timeout, connection or generic HTTP error.
pub(crate) fn classify(stage: RequestStage, subject: &str, err: reqwest::Error) -> WasteError {
    if err.is_timeout() {
        WasteError::Timeout {
            stage,
            subject: subject.to_string(),
        }
    } else if err.is_connect() {
        WasteError::Connection { stage, source: err }
    } else {
        WasteError::Http { stage, source: err }
    }
}
