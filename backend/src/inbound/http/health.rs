//! Liveness and readiness probes.
//!
//! Liveness only tracks the process lifecycle. Readiness additionally pings
//! the movie store on every call, so a lost database connection takes the
//! instance out of rotation without restarting it.

use actix_web::{HttpResponse, get, http::header, web};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use crate::inbound::http::state::HttpState;

/// Lifecycle flags shared by the probes and the server bootstrap.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not yet accepting traffic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness while the server drains.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(healthy: bool) -> HttpResponse {
    let mut response = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once bound and while the movie store answers a ping.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Listener bound and movie store reachable"),
        (status = 503, description = "Still starting or movie store unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(health: web::Data<HealthState>, state: web::Data<HttpState>) -> HttpResponse {
    if !health.is_ready() {
        return probe_response(false);
    }
    match state.catalogue.check_store().await {
        Ok(()) => probe_response(true),
        Err(error) => {
            warn!(%error, "readiness check failed: movie store unavailable");
            probe_response(false)
        }
    }
}

/// Liveness probe: 200 until shutdown begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(health: web::Data<HealthState>) -> HttpResponse {
    probe_response(health.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::domain::MovieCatalogue;
    use crate::domain::ports::{MockMovieRepository, MovieRepositoryError};
    use crate::test_support::{fixture_clock, in_memory_catalogue};

    async fn probe(
        health: web::Data<HealthState>,
        catalogue: MovieCatalogue,
        uri: &str,
    ) -> (StatusCode, Option<String>) {
        let app = test::init_service(
            App::new()
                .app_data(health)
                .app_data(web::Data::new(HttpState::new(catalogue)))
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    fn unreachable_store() -> MovieCatalogue {
        let mut repository = MockMovieRepository::new();
        repository
            .expect_ping()
            .returning(|| Err(MovieRepositoryError::connection("pool timed out")));
        MovieCatalogue::new(Arc::new(repository), fixture_clock())
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_flips_after_mark_ready() {
        let (catalogue, _) = in_memory_catalogue();
        let health = web::Data::new(HealthState::new());
        let (before, _) = probe(health.clone(), catalogue.clone(), "/health/ready").await;
        health.mark_ready();
        let (after, cache) = probe(health, catalogue, "/health/ready").await;

        assert_eq!(before, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_fails_while_store_is_unreachable() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();

        let (status, cache) = probe(health, unreachable_store(), "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_ignores_store_and_fails_once_unhealthy() {
        let health = web::Data::new(HealthState::new());
        let (before, _) = probe(health.clone(), unreachable_store(), "/health/live").await;
        health.mark_unhealthy();
        let (after, _) = probe(health, unreachable_store(), "/health/live").await;

        assert_eq!(before, StatusCode::OK);
        assert_eq!(after, StatusCode::SERVICE_UNAVAILABLE);
    }
}
