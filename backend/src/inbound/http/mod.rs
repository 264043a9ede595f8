//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod movies;
pub mod payload;
pub mod state;
pub mod validation;

use actix_web::{HttpResponse, web};

use crate::domain::Error;

pub use error::ApiResult;

/// Fallback for paths no resource matches.
pub async fn unknown_resource() -> ApiResult<HttpResponse> {
    Err(Error::UnknownResource)
}

/// Register the movie resources, health probes and the unknown-route fallback.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use movies_api::Trace;
/// use movies_api::inbound::http::{self, health::HealthState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HealthState::new()))
///     .wrap(Trace)
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    movies::configure(cfg);
    cfg.service(health::ready)
        .service(health::live)
        .default_service(web::to(unknown_resource));
}
