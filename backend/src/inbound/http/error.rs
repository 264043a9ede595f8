//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes. [`classify`] is the single place deciding status, title, detail and
//! field errors; [`ResponseError`] only adds the request path and timestamp.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use chrono::NaiveDateTime;
use mockable::{Clock, DefaultClock};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, FieldErrors, PathVariable, ValidationScope};
use crate::middleware::RequestContext;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_DETAIL: &str = "An unexpected error occurred while processing the request";
const UNKNOWN_RESOURCE_DETAIL: &str = "The requested resource could not be found. Please ensure \
     your request URI has the correct endpoint for accessing that resource";

/// Status, labels and field errors derived from a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Response status code.
    pub status: StatusCode,
    /// Short category label.
    pub title: &'static str,
    /// Human-readable summary.
    pub detail: String,
    /// Per-field messages for field-scoped failures.
    pub field_errors: Option<FieldErrors>,
}

impl Classification {
    fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            title,
            detail: detail.into(),
            field_errors: None,
        }
    }

    fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = Some(errors);
        self
    }
}

fn validation_title(errors: &FieldErrors) -> &'static str {
    if errors.len() > 1 {
        "Validation Errors"
    } else {
        "Validation Error"
    }
}

fn validation_detail(scope: ValidationScope, errors: &FieldErrors) -> &'static str {
    let plural = errors.len() > 1;
    match (scope, plural) {
        (ValidationScope::Movie, false) => "Invalid field in the provided movie",
        (ValidationScope::Movie, true) => "Invalid fields in the provided movie",
        (ValidationScope::MovieList, false) => "Invalid field in the provided movie list",
        (ValidationScope::MovieList, true) => "Invalid fields in the provided movie list",
        (ValidationScope::LaunchDatePath, _) => "Invalid launch date path variable",
    }
}

/// Classify a domain error for HTTP.
///
/// Pure: the same error always yields the same classification.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use movies_api::domain::{Error, MovieId};
/// use movies_api::inbound::http::error::classify;
///
/// let classification = classify(&Error::MovieNotFound(MovieId::new(7)));
/// assert_eq!(classification.status, StatusCode::NOT_FOUND);
/// assert_eq!(classification.title, "Movie Not Found");
/// assert_eq!(classification.detail, "Movie with ID 7 was not found in the database");
/// ```
#[must_use]
pub fn classify(error: &Error) -> Classification {
    match error {
        Error::Validation { scope, errors } => {
            let title = match scope {
                ValidationScope::LaunchDatePath => "Validation Error",
                ValidationScope::Movie | ValidationScope::MovieList => validation_title(errors),
            };
            Classification::new(
                StatusCode::BAD_REQUEST,
                title,
                validation_detail(*scope, errors),
            )
            .with_field_errors(errors.clone())
        }
        Error::MalformedFields(formats) => Classification::new(
            StatusCode::BAD_REQUEST,
            "Request Format Errors",
            "Incorrect format for the movie fields",
        )
        .with_field_errors(
            formats
                .iter()
                .map(|format| (format.field(), format.message().to_owned()))
                .collect(),
        ),
        Error::UnreadableBody { message } => Classification::new(
            StatusCode::BAD_REQUEST,
            "Request Format Errors",
            message.as_str(),
        ),
        Error::PayloadTooLarge { limit } => Classification::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Payload Too Large",
            format!("The request body must not exceed {limit} bytes"),
        ),
        Error::MalformedPathVariable(PathVariable::Id) => Classification::new(
            StatusCode::BAD_REQUEST,
            "ID path variable is in the wrong format",
            format!(
                "The ID must be a numeric value between {} and {}",
                i64::MIN,
                i64::MAX
            ),
        ),
        Error::MalformedPathVariable(PathVariable::LaunchDate) => Classification::new(
            StatusCode::BAD_REQUEST,
            "Launch date path variable is in the wrong format",
            "Launch date must be in the format yyyy-MM-dd",
        ),
        Error::MovieNotFound(_) => Classification::new(
            StatusCode::NOT_FOUND,
            "Movie Not Found",
            error.to_string(),
        ),
        Error::UnknownResource => Classification::new(
            StatusCode::NOT_FOUND,
            "Invalid URI",
            UNKNOWN_RESOURCE_DETAIL,
        ),
        Error::MethodNotAllowed { method, allowed } => Classification::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            format!(
                "The request method '{method}' is not allowed for this endpoint. \
                 Allowed methods: {}",
                allowed.join(", ")
            ),
        ),
        Error::Internal { .. } => Classification::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            INTERNAL_DETAIL,
        ),
    }
}

/// JSON body returned for every failed movie API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Server-local time the error was produced.
    #[schema(value_type = String, example = "2024-06-15T12:00:00.000")]
    pub timestamp: NaiveDateTime,
    /// Short category label.
    #[schema(example = "Validation Error")]
    pub title: String,
    /// Numeric HTTP status.
    #[schema(example = 400)]
    pub status: u16,
    /// Human-readable summary.
    #[schema(example = "Invalid field in the provided movie")]
    pub detail: String,
    /// Request URI path without the query string.
    #[schema(example = "/api/movies")]
    pub path: String,
    /// Field name to message; present only for field-scoped failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<std::collections::BTreeMap<String, String>>)]
    pub field_errors: Option<FieldErrors>,
}

impl ErrorDetails {
    /// Assemble the payload for a classified error.
    #[must_use]
    pub fn new(
        classification: Classification,
        path: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        let Classification {
            status,
            title,
            detail,
            field_errors,
        } = classification;
        Self {
            timestamp,
            title: title.to_owned(),
            status: status.as_u16(),
            detail,
            path: path.into(),
            field_errors,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        classify(self).status
    }

    fn error_response(&self) -> HttpResponse {
        if let Error::Internal { message } = self {
            error!(error = %message, "request failed with an internal error");
        }

        let path = RequestContext::current()
            .map(|context| context.path().to_owned())
            .unwrap_or_default();
        let details = ErrorDetails::new(classify(self), path, DefaultClock.local().naive_local());

        let mut builder = HttpResponse::build(self.status_code());
        if let Error::MethodNotAllowed { allowed, .. } = self {
            builder.insert_header((header::ALLOW, allowed.join(", ")));
        }
        builder.json(details)
    }
}
