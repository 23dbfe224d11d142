//! # funnel-error
//!
//! Unified error handling for funnel graph builds.
//!
//! - **ErrorKind**: what went wrong (e.g. `BackendFailure`, `DecodeFailed`)
//! - **ErrorStatus**: whether a retry can help (`Permanent`, `Temporary`, `Persistent`)
//! - **Context**: operation name plus key/value pairs such as the tenant
//! - **Source**: the wrapped underlying error, if any
//!
//! ```rust
//! use funnel_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::BackendFailure, "multi-search rejected")
//!         .with_operation("graph::build")
//!         .with_context("tenant", "acme"))
//! }
//! ```
//!
//! Backend failures default to `Temporary`; decoding and invariant errors are
//! `Permanent` and indicate a bug or an incompatible encoding upstream.

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the funnel [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
