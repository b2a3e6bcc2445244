//! Error taxonomy shared by the rate source, the rate store and the workflows.

use std::error::Error as StdError;
use std::fmt::{self, Display};

/// Which part of the network exchange failed before a response arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFailureKind {
    Connect,
    Timeout,
    Tls,
    Other,
}

impl Display for NetworkFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NetworkFailureKind::Connect => "connection failed",
                NetworkFailureKind::Timeout => "request timed out",
                NetworkFailureKind::Tls => "TLS handshake failed",
                NetworkFailureKind::Other => "request failed",
            }
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network failure: {kind}")]
    NetworkFailure {
        kind: NetworkFailureKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("Rate service returned HTTP {status} for {url}")]
    RemoteError {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed rate response: {context}")]
    MalformedResponse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rate storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("No saved rate for currency {0}")]
    NotFound(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps a transport error, keeping timeouts, TLS and connection failures apart.
    pub fn network(source: reqwest::Error) -> Self {
        let kind = if source.is_timeout() {
            NetworkFailureKind::Timeout
        } else if caused_by_tls(&source) {
            NetworkFailureKind::Tls
        } else if source.is_connect() {
            NetworkFailureKind::Connect
        } else {
            NetworkFailureKind::Other
        };
        Error::NetworkFailure { kind, source }
    }

    pub fn invalid_input(field: &'static str, reason: &'static str) -> Self {
        Error::InvalidInput { field, reason }
    }
}

// reqwest folds certificate problems into connect errors; the TLS backend's
// message is only visible further down the source chain.
fn caused_by_tls(err: &reqwest::Error) -> bool {
    let mut source = StdError::source(err);
    while let Some(e) = source {
        let msg = e.to_string().to_lowercase();
        if msg.contains("certificate") || msg.contains("tls") || msg.contains("ssl") {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = Error::invalid_input("principal", "must be greater than 0");
        assert_eq!(err.to_string(), "Invalid principal: must be greater than 0");
    }

    #[test]
    fn test_not_found_names_currency() {
        let err = Error::NotFound("EUR".to_string());
        assert!(err.to_string().contains("EUR"));
    }

    #[test]
    fn test_network_kind_display() {
        assert_eq!(NetworkFailureKind::Timeout.to_string(), "request timed out");
        assert_eq!(NetworkFailureKind::Tls.to_string(), "TLS handshake failed");
    }
}
