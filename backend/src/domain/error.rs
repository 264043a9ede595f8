//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters classify them into
//! HTTP responses; every failure the service can report is a variant here so
//! the classification stays a single exhaustive match.

use std::collections::BTreeSet;
use std::fmt;

use super::movie::MovieId;
use super::validation::{Field, FieldErrors};

/// Which request shape failed field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    /// A single movie body.
    Movie,
    /// A JSON array of movies.
    MovieList,
    /// The launch date path segment.
    LaunchDatePath,
}

/// Field whose JSON value could not be read as the expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldFormat {
    /// Expected a `yyyy-MM-dd` string.
    LaunchDate,
    /// Expected a decimal number.
    Rating,
    /// Expected a 64-bit integer.
    Revenue,
}

impl FieldFormat {
    /// Field the failure belongs to.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::LaunchDate => Field::LaunchDate,
            Self::Rating => Field::Rating,
            Self::Revenue => Field::Revenue,
        }
    }

    /// Client-facing message describing the expected format.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LaunchDate => "Launch date must be in the format yyyy-MM-dd",
            Self::Rating => "Rating must be a number between 0.0 and 10.0",
            Self::Revenue => "Revenue must be a number",
        }
    }
}

/// Path segment that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVariable {
    /// The `{id}` segment of `/api/movies/{id}`.
    Id,
    /// The `{launchDate}` segment of `/api/movies/launchDate/{launchDate}`.
    LaunchDate,
}

impl fmt::Display for PathVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("id"),
            Self::LaunchDate => f.write_str("launchDate"),
        }
    }
}

/// Every failure the movie service reports to its callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// One or more fields failed their predicates.
    #[error("validation failed for {scope:?}: {errors}")]
    Validation {
        /// Request shape the errors were found in.
        scope: ValidationScope,
        /// One message per failing field.
        errors: FieldErrors,
    },
    /// Recognised movie fields held values of the wrong JSON type.
    #[error("malformed movie fields: {0:?}")]
    MalformedFields(BTreeSet<FieldFormat>),
    /// The body could not be read as movie JSON.
    #[error("unreadable request body: {message}")]
    UnreadableBody {
        /// Decoder or transport message, returned to the client verbatim.
        message: String,
    },
    /// The body exceeded the configured size limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },
    /// A path segment could not be parsed.
    #[error("malformed path variable {0}")]
    MalformedPathVariable(PathVariable),
    /// No movie is stored under the identifier.
    #[error("Movie with ID {0} was not found in the database")]
    MovieNotFound(MovieId),
    /// No route matches the request path.
    #[error("no resource matches the request path")]
    UnknownResource,
    /// The route exists but does not accept the request method.
    #[error("method {method} not allowed")]
    MethodNotAllowed {
        /// Method the client sent.
        method: String,
        /// Methods the route accepts, in registration order.
        allowed: Vec<String>,
    },
    /// Unexpected failure; the message is for logs only.
    #[error("internal error: {message}")]
    Internal {
        /// Diagnostic text, never sent to clients.
        message: String,
    },
}

impl Error {
    /// Field validation failure for `scope`.
    #[must_use]
    pub const fn validation(scope: ValidationScope, errors: FieldErrors) -> Self {
        Self::Validation { scope, errors }
    }

    /// Recognised field-type failures, deduplicated.
    pub fn malformed_fields(formats: impl IntoIterator<Item = FieldFormat>) -> Self {
        Self::MalformedFields(formats.into_iter().collect())
    }

    /// Body that is not movie JSON at all.
    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self::UnreadableBody {
            message: message.into(),
        }
    }

    /// Method mismatch on a matched route.
    pub fn method_not_allowed(
        method: impl Into<String>,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Unexpected failure carrying diagnostic text for the logs.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
