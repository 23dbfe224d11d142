//! Error status for retry logic

use std::fmt;

/// Whether an error can be retried.
///
/// - `Permanent`: retrying will not help without an external change
/// - `Temporary`: retrying may succeed (backend hiccup, timeout)
/// - `Persistent`: was temporary but kept failing, stop retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Don't retry.
    ///
    /// Examples: DecodeFailed, InvariantViolation, ConfigInvalid
    #[default]
    Permanent,

    /// Retry may succeed.
    ///
    /// Examples: BackendFailure, Timeout, IoFailed
    Temporary,

    /// Was temporary but persisted after retries.
    Persistent,
}

impl ErrorStatus {
    /// Check if retry is recommended
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    /// Mark as persistent after failed retries
    pub fn persist(self) -> Self {
        match self {
            ErrorStatus::Temporary => ErrorStatus::Persistent,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
            ErrorStatus::Persistent => "persistent",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
