//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the catalogue service and remain testable without I/O.

use crate::domain::MovieCatalogue;

/// Largest request body accepted unless configured otherwise (16 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Movie use cases.
    pub catalogue: MovieCatalogue,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl HttpState {
    /// Bundle the catalogue service with the default body limit.
    #[must_use]
    pub const fn new(catalogue: MovieCatalogue) -> Self {
        Self {
            catalogue,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Override the maximum request body size.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}
