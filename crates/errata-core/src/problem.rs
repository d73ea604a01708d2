use std::borrow::Cow;
use std::error::Error;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{ErrorKind, is_kind};

/// Base URI used for problem `type` values unless configured otherwise
pub const DEFAULT_TYPE_BASE_URI: &str = "https://example.com/errors";

/// Media type for RFC 9457 bodies
pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";

const INTERNAL_SERVER_ERROR_SUFFIX: &str = "internal-server-error";
const INTERNAL_SERVER_ERROR_TITLE: &str = "Internal Server Error";
const INTERNAL_SERVER_ERROR_DETAIL: &str = "An unexpected error occurred.";

/// RFC 9457 problem details document
///
/// <https://www.rfc-editor.org/rfc/rfc9457.html>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemResponse {
    /// URI identifying the problem type
    pub r#type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable explanation
    pub detail: String,
    /// Validation messages, only present on validation responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ProblemResponse {
    /// Status as an [`http::StatusCode`]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Destination for a rendered problem
///
/// Implemented by whatever owns the outgoing response. The core only needs
/// to hand over a status code and a JSON-serializable body.
pub trait ResponseSink {
    fn write_json(&mut self, status: StatusCode, body: &ProblemResponse);
}

/// In-memory sink that keeps the last written problem
#[derive(Debug, Default)]
pub struct RecordingSink {
    written: Option<(StatusCode, ProblemResponse)>,
}

impl RecordingSink {
    pub fn status(&self) -> Option<StatusCode> {
        self.written.as_ref().map(|(status, _)| *status)
    }

    pub fn body(&self) -> Option<&ProblemResponse> {
        self.written.as_ref().map(|(_, body)| body)
    }

    /// Serialized body, `null` if nothing was written
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.body())
    }
}

impl ResponseSink for RecordingSink {
    fn write_json(&mut self, status: StatusCode, body: &ProblemResponse) {
        self.written = Some((status, body.clone()));
    }
}

/// Renders errors into [`ProblemResponse`] documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemBuilder {
    type_base_uri: Cow<'static, str>,
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ProblemBuilder {
    const DEFAULT: Self = Self {
        type_base_uri: Cow::Borrowed(DEFAULT_TYPE_BASE_URI),
    };

    /// Create a builder whose `type` URIs live under `type_base_uri`
    ///
    /// A trailing slash is ignored.
    pub fn new(type_base_uri: impl Into<String>) -> Self {
        let mut base = type_base_uri.into();
        while base.ends_with('/') {
            base.pop();
        }

        Self {
            type_base_uri: Cow::Owned(base),
        }
    }

    pub fn type_base_uri(&self) -> &str {
        &self.type_base_uri
    }

    /// Full problem type URI for a suffix such as `not-found`
    pub fn type_uri(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.type_base_uri)
    }

    /// Map an error to its problem document
    ///
    /// Categories are tested in [`ErrorKind::DISPATCH_ORDER`] against the
    /// whole causal chain; the first hit wins. The category's static detail
    /// is used, never the error's own message. Anything unclassified, and
    /// anything classified only as `UnprocessableEntity`, becomes a 500.
    pub fn handle_error(&self, err: &(dyn Error + 'static)) -> ProblemResponse {
        ErrorKind::DISPATCH_ORDER
            .into_iter()
            .find(|kind| is_kind(err, *kind))
            .map_or_else(|| self.internal_server_error(), |kind| self.for_kind(kind))
    }

    /// Problem document for a list of validation failures
    ///
    /// Always a 422; `errors` keeps the input order and may be empty.
    pub fn handle_validation_error<I, S>(&self, messages: I) -> ProblemResponse
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProblemResponse {
            errors: Some(messages.into_iter().map(Into::into).collect()),
            ..self.for_kind(ErrorKind::UnprocessableEntity)
        }
    }

    /// Render `err` and write it to `sink`, returning the status written
    pub fn write_error<S>(&self, sink: &mut S, err: &(dyn Error + 'static)) -> StatusCode
    where
        S: ResponseSink + ?Sized,
    {
        let problem = self.handle_error(err);
        let status = problem.status_code();
        sink.write_json(status, &problem);
        status
    }

    /// Render validation failures and write them to `sink` with status 422
    pub fn write_validation_error<S, I, M>(&self, sink: &mut S, messages: I) -> StatusCode
    where
        S: ResponseSink + ?Sized,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let problem = self.handle_validation_error(messages);
        let status = problem.status_code();
        sink.write_json(status, &problem);
        status
    }

    fn for_kind(&self, kind: ErrorKind) -> ProblemResponse {
        ProblemResponse {
            r#type: self.type_uri(kind.type_suffix()),
            title: kind.title().to_owned(),
            status: kind.status_code().as_u16(),
            detail: kind.detail().to_owned(),
            errors: None,
        }
    }

    fn internal_server_error(&self) -> ProblemResponse {
        ProblemResponse {
            r#type: self.type_uri(INTERNAL_SERVER_ERROR_SUFFIX),
            title: INTERNAL_SERVER_ERROR_TITLE.to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: INTERNAL_SERVER_ERROR_DETAIL.to_owned(),
            errors: None,
        }
    }
}

/// [`ProblemBuilder::handle_error`] with the default type base URI
pub fn handle_error(err: &(dyn Error + 'static)) -> ProblemResponse {
    ProblemBuilder::DEFAULT.handle_error(err)
}

/// [`ProblemBuilder::handle_validation_error`] with the default type base URI
pub fn handle_validation_error<I, S>(messages: I) -> ProblemResponse
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ProblemBuilder::DEFAULT.handle_validation_error(messages)
}

/// [`ProblemBuilder::write_error`] with the default type base URI
pub fn write_error<S>(sink: &mut S, err: &(dyn Error + 'static)) -> StatusCode
where
    S: ResponseSink + ?Sized,
{
    ProblemBuilder::DEFAULT.write_error(sink, err)
}

/// [`ProblemBuilder::write_validation_error`] with the default type base URI
pub fn write_validation_error<S, I, M>(sink: &mut S, messages: I) -> StatusCode
where
    S: ResponseSink + ?Sized,
    I: IntoIterator<Item = M>,
    M: Into<String>,
{
    ProblemBuilder::DEFAULT.write_validation_error(sink, messages)
}
