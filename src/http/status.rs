//! Classification of download failures.
//!
//! A release host answers with the payload (200), a definite "not published"
//! (404), or something else. Everything except a local write failure is
//! recoverable by building from source instead.

use reqwest::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    /// HTTP 404: no asset for this version and platform.
    NotPublished,
    /// Any other non-200 response.
    Status(StatusCode),
    /// DNS, connection, TLS or body streaming failure.
    Transport(String),
    /// The response was fine but could not be written locally.
    Write(anyhow::Error),
}

impl FetchError {
    /// Whether a source build can stand in for the failed download.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FetchError::Write(_))
    }

    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        FetchError::Transport(message)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotPublished => write!(f, "asset not published (HTTP 404)"),
            FetchError::Status(status) => write!(f, "HTTP {}", status.as_u16()),
            FetchError::Transport(msg) => write!(f, "download failed: {}", msg),
            FetchError::Write(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for FetchError {}

/// Only a 200 carries the binary.
pub fn classify_status(status: StatusCode) -> Result<(), FetchError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::NotPublished),
        other => Err(FetchError::Status(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::OK).is_ok());
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND),
            Err(FetchError::NotPublished)
        ));

        for status in [
            StatusCode::NO_CONTENT,
            StatusCode::PARTIAL_CONTENT,
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            match classify_status(status) {
                Err(FetchError::Status(s)) => assert_eq!(s, status),
                other => panic!("unexpected classification for {}: {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_only_write_errors_are_fatal() {
        assert!(FetchError::NotPublished.is_recoverable());
        assert!(FetchError::Status(StatusCode::BAD_GATEWAY).is_recoverable());
        assert!(FetchError::Transport("connection refused".into()).is_recoverable());
        assert!(!FetchError::Write(anyhow::anyhow!("disk full")).is_recoverable());
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::NotPublished.to_string(),
            "asset not published (HTTP 404)"
        );
        assert_eq!(
            FetchError::Status(StatusCode::SERVICE_UNAVAILABLE).to_string(),
            "HTTP 503"
        );
        assert_eq!(
            FetchError::Transport("dns error".into()).to_string(),
            "download failed: dns error"
        );
    }
}
