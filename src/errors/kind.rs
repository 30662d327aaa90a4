// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Classification of balance fetch failures.
//!
//! Every failed RPC attempt is reduced to an [`ErrorKind`] that decides
//! whether the surrounding retry policy may try again. Only transient
//! transport conditions (throttling, timeouts, connection drops) are
//! retryable; everything else is terminal for that address.

use serde::Serialize;

/// What went wrong with one balance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Structurally malformed address; never resolvable by retrying.
    InvalidAddress,
    /// Remote node is throttling us.
    RateLimited,
    /// Request exceeded its time budget.
    Timeout,
    /// Transport-level failure (refused, reset, DNS).
    ConnectionError,
    /// The run was externally interrupted mid-flight.
    Cancelled,
    /// Unclassified failure; terminal.
    Unknown,
}

impl ErrorKind {
    /// Whether a failure of this kind may succeed on a later attempt.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::Timeout | ErrorKind::ConnectionError
        )
    }

    /// Stable name used in display strings and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidAddress => "InvalidAddress",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure from a single balance query attempt.
///
/// Carries the [`ErrorKind`] used by [`RetryPolicy`](crate::RetryPolicy)
/// to decide retryability, plus the original provider message for logs
/// and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// Human-readable detail from the underlying error.
    pub message: String,
}

impl FetchError {
    /// Create a fetch error with an explicit kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Timeout failure (retryable).
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Connection failure (retryable).
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConnectionError, message)
    }

    /// Rate limiting failure (retryable).
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Cancellation marker for an address whose query never completed.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "scan interrupted before completion")
    }

    /// Whether the retry policy may attempt this query again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Classify an arbitrary provider error by its rendered message.
    ///
    /// Alloy's transport errors do not expose a stable structured taxonomy
    /// across versions, so classification matches on the error text: node
    /// address rejections map to `InvalidAddress`, HTTP 429 and throttling
    /// vocabulary to `RateLimited`, timeout vocabulary to `Timeout`,
    /// connection vocabulary to `ConnectionError`. Anything else is
    /// `Unknown` and terminal.
    pub fn classify(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        let lower = message.to_lowercase();

        let kind = if lower.contains("invalid address") || lower.contains("bad address checksum") {
            ErrorKind::InvalidAddress
        } else if lower.contains("429")
            || lower.contains("rate limit")
            || lower.contains("too many requests")
        {
            ErrorKind::RateLimited
        } else if lower.contains("timed out") || lower.contains("timeout") {
            ErrorKind::Timeout
        } else if lower.contains("connection")
            || lower.contains("connect")
            || lower.contains("refused")
            || lower.contains("reset")
            || lower.contains("broken pipe")
            || lower.contains("dns")
        {
            ErrorKind::ConnectionError
        } else {
            ErrorKind::Unknown
        };

        Self { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(ErrorKind::RateLimited.is_retryable());
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ConnectionError.is_retryable());

        assert!(!ErrorKind::InvalidAddress.is_retryable());
        assert!(!ErrorKind::Cancelled.is_retryable());
        assert!(!ErrorKind::Unknown.is_retryable());
    }

    #[test]
    fn classify_rate_limit() {
        let err = FetchError::classify("HTTP error 429 Too Many Requests");
        assert_eq!(err.kind, ErrorKind::RateLimited);

        let err = FetchError::classify("provider rate limit exceeded");
        assert_eq!(err.kind, ErrorKind::RateLimited);
    }

    #[test]
    fn classify_timeout() {
        let err = FetchError::classify("request timed out after 10s");
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[test]
    fn classify_connection() {
        for message in [
            "connection refused",
            "failed to connect to host",
            "connection reset by peer",
            "dns error: failed to lookup",
        ] {
            let err = FetchError::classify(message);
            assert_eq!(err.kind, ErrorKind::ConnectionError, "{message}");
        }
    }

    #[test]
    fn classify_invalid_address_is_not_retried() {
        let err = FetchError::classify("invalid address: wrong length");
        assert_eq!(err.kind, ErrorKind::InvalidAddress);
        assert!(!err.is_retryable());
    }

    #[test]
    fn classify_unknown_is_terminal() {
        let err = FetchError::classify("execution reverted");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(!err.is_retryable());
    }

    #[test]
    fn classify_preserves_original_message() {
        let err = FetchError::classify("Connection refused (os error 111)");
        assert_eq!(err.message, "Connection refused (os error 111)");
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = FetchError::timeout("eth_getBalance exceeded 10s");
        assert_eq!(err.to_string(), "Timeout: eth_getBalance exceeded 10s");
    }
}
