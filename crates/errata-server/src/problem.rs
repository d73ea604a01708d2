use std::error::Error;
use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use errata_core::{
    BoxError, ClassifiedError, DEFAULT_TYPE_BASE_URI, PROBLEM_JSON_CONTENT_TYPE, ProblemBuilder, ProblemResponse,
    ResponseSink,
};
use http::{StatusCode, Uri, header};

/// [`ResponseSink`] that produces an axum [`Response`]
///
/// Sets `Content-Type: application/problem+json` and stores the rendered
/// [`ProblemResponse`] in the response extensions.
#[derive(Default)]
pub struct AxumSink {
    response: Option<Response>,
}

impl ResponseSink for AxumSink {
    fn write_json(&mut self, status: StatusCode, body: &ProblemResponse) {
        let mut response = (
            status,
            [(header::CONTENT_TYPE, PROBLEM_JSON_CONTENT_TYPE)],
            Json(body.clone()),
        )
            .into_response();
        response.extensions_mut().insert(body.clone());
        self.response = Some(response);
    }
}

impl IntoResponse for AxumSink {
    fn into_response(self) -> Response {
        self.response
            .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

/// Handler error rendered as an RFC 9457 problem
///
/// Anything that converts into [`anyhow::Error`] converts into it, so
/// handlers can use `?` on classified errors, wrapped errors and
/// `anyhow::Result` alike. Classification is looked up along the whole
/// causal chain; the chain itself never reaches the response body.
#[derive(Debug)]
pub struct ApiError(Inner);

#[derive(Debug)]
enum Inner {
    Anyhow(anyhow::Error),
    Boxed(BoxError),
}

impl ApiError {
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self(Inner::Anyhow(err.into()))
    }

    /// Keep an already boxed error as is so its concrete type stays visible
    pub fn from_boxed(err: BoxError) -> Self {
        Self(Inner::Boxed(err))
    }

    pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
        match &self.0 {
            Inner::Anyhow(err) => &**err,
            Inner::Boxed(err) => &**err,
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(err)
    }
}

/// Marks a problem response rendered under [`DEFAULT_TYPE_BASE_URI`]
#[derive(Debug, Clone, Copy)]
struct DefaultTypeBase;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err: &(dyn Error + 'static) = self.as_error();

        let mut sink = AxumSink::default();
        let status = errata_core::write_error(&mut sink, err);

        if status.is_server_error() {
            let chain = errata_core::chain(err)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" <- ");
            tracing::error!(error = %chain, "unclassified error rendered as internal server error");
        } else {
            tracing::debug!(
                status = status.as_u16(),
                kind = ?errata_core::kind_of(err),
                "rendered problem response"
            );
        }

        let mut response = sink.into_response();
        response.extensions_mut().insert(DefaultTypeBase);
        response
    }
}

/// Validation failures rendered as a 422 problem with an `errors` member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` if nothing was collected, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns the collected messages when at least one was pushed
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl<S: Into<String>> FromIterator<S> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        tracing::debug!(count = self.0.len(), "rendered validation problem");

        let mut sink = AxumSink::default();
        errata_core::write_validation_error(&mut sink, self.0);

        let mut response = sink.into_response();
        response.extensions_mut().insert(DefaultTypeBase);
        response
    }
}

/// Fallback for unmatched routes
pub async fn not_found_fallback(uri: Uri) -> ApiError {
    ClassifiedError::not_found(format!("no route for {uri}")).into()
}

/// Re-render problem responses under the configured type base URI
///
/// [`ApiError`] and [`ValidationErrors`] render with the default base since
/// they have no access to server state. This runs after the handler and
/// swaps the `type` prefix of those responses when a different base is
/// configured. Status, headers and extensions set by the handler are kept.
pub async fn problem_type_middleware(problems: Arc<ProblemBuilder>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let default_based = response.extensions().get::<DefaultTypeBase>().is_some();
    if !default_based || problems.type_base_uri() == DEFAULT_TYPE_BASE_URI {
        return response;
    }

    let Some(rebased) = response
        .extensions()
        .get::<ProblemResponse>()
        .and_then(|problem| rebase(&problems, problem))
    else {
        return response;
    };

    let body = match serde_json::to_vec(&rebased) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize rebased problem");
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.extensions.remove::<DefaultTypeBase>();
    parts.extensions.insert(rebased);

    Response::from_parts(parts, Body::from(body))
}

fn rebase(problems: &ProblemBuilder, problem: &ProblemResponse) -> Option<ProblemResponse> {
    let suffix = problem
        .r#type
        .strip_prefix(DEFAULT_TYPE_BASE_URI)?
        .strip_prefix('/')?;

    Some(ProblemResponse {
        r#type: problems.type_uri(suffix),
        ..problem.clone()
    })
}
