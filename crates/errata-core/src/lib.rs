//! Error classification and RFC 9457 problem rendering
//!
//! Application code builds a [`ClassifiedError`] tagged with one of the
//! fixed [`ErrorKind`] categories, optionally chaining a lower-level cause.
//! [`ProblemBuilder`] maps any error to a [`ProblemResponse`] and writes it
//! to a [`ResponseSink`]. Nothing here depends on an HTTP framework.

mod chain;
mod classified;
mod kind;
mod problem;

pub use chain::{WrappedError, as_classified, chain, is_kind, kind_of, same_kind, unwrap_cause, wrap};
pub use classified::{BoxError, ClassifiedError};
pub use kind::ErrorKind;
pub use problem::{
    DEFAULT_TYPE_BASE_URI, PROBLEM_JSON_CONTENT_TYPE, ProblemBuilder, ProblemResponse, RecordingSink, ResponseSink,
    handle_error, handle_validation_error, write_error, write_validation_error,
};
