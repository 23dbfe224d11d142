//! Error kinds for funnel builds

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to tell retryable backend trouble apart from
/// internal bugs in the transform or in the upstream encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration value
    ConfigInvalid,

    // =========================================================================
    // Backend errors
    // =========================================================================
    /// The query layer could not produce an aggregation summary
    BackendFailure,

    /// A summary that must accompany a successful query was absent
    MissingAggregation,

    /// The backend did not answer in time
    Timeout,

    // =========================================================================
    // Transform errors
    // =========================================================================
    /// A node token did not decode cleanly
    DecodeFailed,

    /// Internal invariant violated
    InvariantViolation,

    // =========================================================================
    // File/IO and serialization errors
    // =========================================================================
    FileNotFound,

    IoFailed,

    SerializationFailed,

    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::BackendFailure | ErrorKind::Timeout | ErrorKind::IoFailed
        )
    }

    /// Errors that point at a bug or at corrupted data, never at the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvariantViolation | ErrorKind::DecodeFailed | ErrorKind::MissingAggregation
        )
    }
}
