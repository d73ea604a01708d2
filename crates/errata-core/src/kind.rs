use http::StatusCode;
use strum::{EnumIter, IntoStaticStr};

/// Closed set of error categories a [`ClassifiedError`](crate::ClassifiedError) can carry
///
/// Each category owns static problem metadata. The `strum` kebab-case
/// name doubles as the type-URI suffix (e.g. `not-found`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 408
    RequestTimeout,
    /// 409
    Conflict,
    /// 422
    UnprocessableEntity,
    /// 429
    TooManyRequests,
}

impl ErrorKind {
    /// Order in which categories are tested against an error chain when
    /// rendering a problem
    ///
    /// `UnprocessableEntity` is absent: 422 responses only come from the
    /// validation path, so a classified error of that category renders as 500.
    pub const DISPATCH_ORDER: [Self; 7] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::RequestTimeout,
        Self::Conflict,
        Self::TooManyRequests,
    ];

    /// HTTP status code for this category
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Conflict => StatusCode::CONFLICT,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Short human-readable summary used as the problem `title`
    pub const fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::RequestTimeout => "Request Timeout",
            Self::Conflict => "Conflict",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::TooManyRequests => "Too Many Requests",
        }
    }

    /// Static sentence used as the problem `detail`
    pub const fn detail(self) -> &'static str {
        match self {
            Self::BadRequest => "The request could not be processed due to invalid syntax or parameters.",
            Self::Unauthorized => "Authentication is required to access this resource.",
            Self::Forbidden => "You do not have permission to access this resource.",
            Self::NotFound => "The requested resource could not be found.",
            Self::RequestTimeout => "The request took too long to process and timed out.",
            Self::Conflict => {
                "The request could not be completed due to a conflict with the current state of the resource."
            }
            Self::UnprocessableEntity => "The input parameters are invalid. See the errors member for details.",
            Self::TooManyRequests => "You have sent too many requests in a given amount of time.",
        }
    }

    /// Path segment appended to the type base URI
    pub fn type_suffix(self) -> &'static str {
        self.into()
    }
}
