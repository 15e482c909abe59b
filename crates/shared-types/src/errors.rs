//! # Error Types
//!
//! Error classification shared by every service, plus the error returned by
//! synchronous cross-service calls.

use crate::entities::ServiceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-visible error classes. Every service error maps onto exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Referenced post, user or edge is absent.
    NotFound,
    /// Ownership violation, block violation or self-relation.
    Forbidden,
    /// Malformed content (e.g. post content-count or length rules).
    InvalidRequest,
    /// A synchronous call to another service failed.
    UpstreamUnavailable,
    /// Anything uncategorized.
    Unexpected,
}

impl ErrorKind {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidRequest => "invalid_request",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::Unexpected => "unexpected",
        }
    }

    /// Conventional HTTP status for the kind.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::InvalidRequest => 400,
            Self::UpstreamUnavailable => 502,
            Self::Unexpected => 500,
        }
    }
}

/// Failure of a synchronous query against another service.
///
/// "Not found" is not an error at this level: lookups return `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote service could not be reached or failed to answer.
    #[error("{service} unavailable: {reason}")]
    Unavailable { service: ServiceId, reason: String },

    /// The remote service answered with something that could not be used.
    #[error("{service} returned an invalid response: {reason}")]
    InvalidResponse { service: ServiceId, reason: String },
}

impl RemoteError {
    pub fn unavailable(service: ServiceId, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            reason: reason.into(),
        }
    }

    /// The service that failed.
    #[must_use]
    pub fn service(&self) -> ServiceId {
        match self {
            Self::Unavailable { service, .. } | Self::InvalidResponse { service, .. } => *service,
        }
    }

    /// Every remote failure surfaces to the original caller as upstream-unavailable.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::UpstreamUnavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::unavailable(ServiceId::SocialGraph, "connection refused");
        assert_eq!(
            err.to_string(),
            "sn-02-social-graph unavailable: connection refused"
        );
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert_eq!(err.service(), ServiceId::SocialGraph);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Forbidden.http_status(), 403);
        assert_eq!(ErrorKind::InvalidRequest.http_status(), 400);
    }
}
