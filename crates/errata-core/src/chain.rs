use std::error::Error;

use crate::{BoxError, ClassifiedError, ErrorKind};

/// Error that adds context to a cause without classifying it
#[derive(Debug, thiserror::Error)]
#[error("{message}: {source}")]
pub struct WrappedError {
    message: String,
    source: BoxError,
}

impl WrappedError {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Take back ownership of the wrapped cause
    pub fn into_cause(self) -> BoxError {
        self.source
    }
}

/// Decorate `cause` with a context message
///
/// The result displays as `"<message>: <cause>"` and its source is exactly
/// `cause`. No category is attached.
pub fn wrap(message: impl Into<String>, cause: impl Into<BoxError>) -> WrappedError {
    WrappedError {
        message: message.into(),
        source: cause.into(),
    }
}

/// Immediate cause of `err`, or `None` for a leaf error
pub fn unwrap_cause<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// Iterate over `err` followed by every transitive cause
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(err), |&current| current.source())
}

/// `err` as a [`ClassifiedError`], looking through one `Box`
///
/// `Box<T>` forwards `source()` to `T`'s causes, so a boxed classified error
/// never shows up as its own chain link.
pub fn as_classified<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ClassifiedError> {
    err.downcast_ref::<ClassifiedError>()
        .or_else(|| err.downcast_ref::<Box<ClassifiedError>>().map(|boxed| &**boxed))
}

/// Whether `a` and `b` are both classified errors of the same category
///
/// Only the errors themselves are compared; their causes are not walked.
pub fn same_kind(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    match (as_classified(a), as_classified(b)) {
        (Some(a), Some(b)) => a.same_kind(b),
        _ => false,
    }
}

/// Whether any link in the causal chain is a classified error of `kind`
pub fn is_kind(err: &(dyn Error + 'static), kind: ErrorKind) -> bool {
    chain(err).any(|link| as_classified(link).is_some_and(|classified| classified.kind() == kind))
}

/// Category of the first classified link in the causal chain
pub fn kind_of(err: &(dyn Error + 'static)) -> Option<ErrorKind> {
    chain(err).find_map(|link| as_classified(link).map(ClassifiedError::kind))
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn wrap_prefixes_message() {
        let wrapped = wrap("wrapped error", io::Error::other("base error"));
        assert_eq!(wrapped.to_string(), "wrapped error: base error");
        assert_eq!(wrapped.message(), "wrapped error");
    }

    #[test]
    fn unwrap_returns_the_exact_cause() {
        let cause: BoxError = Box::new(io::Error::other("root cause"));
        let cause_ptr = std::ptr::from_ref(cause.as_ref()).cast::<()>();

        let wrapped = wrap("bad request", cause);
        let unwrapped = unwrap_cause(&wrapped).expect("wrapped error has a cause");

        assert!(std::ptr::eq(std::ptr::from_ref(unwrapped).cast::<()>(), cause_ptr));
        assert_eq!(unwrapped.to_string(), "root cause");
    }

    #[test]
    fn unwrap_leaf_is_none() {
        let leaf = ClassifiedError::forbidden("nope");
        assert!(unwrap_cause(&leaf).is_none());
        assert!(unwrap_cause(&io::Error::other("plain")).is_none());
    }

    #[test]
    fn chain_walks_to_the_root() {
        let root = io::Error::other("connection reset");
        let err = wrap(
            "load profile",
            ClassifiedError::request_timeout("profile service timed out").with_cause(wrap("read socket", root)),
        );

        let messages: Vec<_> = chain(&err).map(ToString::to_string).collect();
        assert_eq!(
            messages,
            [
                "load profile: profile service timed out",
                "profile service timed out",
                "read socket: connection reset",
                "connection reset",
            ]
        );
    }

    #[test]
    fn same_kind_across_messages() {
        let a = ClassifiedError::bad_request("bad request");
        let b = ClassifiedError::bad_request("another bad request");
        assert!(same_kind(&a, &b));
    }

    #[test]
    fn same_kind_rejects_other_categories() {
        let a = ClassifiedError::bad_request("bad request");
        let b = ClassifiedError::unauthorized("unauthorized");
        assert!(!same_kind(&a, &b));
    }

    #[test]
    fn same_kind_rejects_unclassified() {
        let classified = ClassifiedError::not_found("missing");
        let wrapped = wrap("context", ClassifiedError::not_found("missing"));
        let plain = io::Error::other("plain");

        assert!(!same_kind(&classified, &wrapped));
        assert!(!same_kind(&wrapped, &classified));
        assert!(!same_kind(&plain, &classified));
        assert!(!same_kind(&wrapped, &wrapped));
    }

    #[test]
    fn is_kind_sees_through_wrapping() {
        let err = wrap("lookup user", wrap("query", ClassifiedError::not_found("user 7 missing")));
        assert!(is_kind(&err, ErrorKind::NotFound));
        assert!(!is_kind(&err, ErrorKind::Conflict));
        assert_eq!(kind_of(&err), Some(ErrorKind::NotFound));
    }

    #[test]
    fn kind_of_prefers_the_outermost_classification() {
        let err = ClassifiedError::conflict("outer").with_cause(ClassifiedError::bad_request("inner"));
        assert_eq!(kind_of(&err), Some(ErrorKind::Conflict));
        assert!(is_kind(&err, ErrorKind::BadRequest));
    }

    #[test]
    fn boxed_classified_cause_is_matched() {
        let err = wrap("ctx", Box::new(ClassifiedError::not_found("gone")));
        assert!(is_kind(&err, ErrorKind::NotFound));
        assert_eq!(kind_of(&err), Some(ErrorKind::NotFound));

        let boxed = Box::new(ClassifiedError::not_found("other"));
        assert!(same_kind(&boxed, &ClassifiedError::not_found("missing")));
    }

    #[test]
    fn unclassified_has_no_kind() {
        let err = wrap("context", io::Error::other("disk full"));
        assert_eq!(kind_of(&err), None);
    }
}
