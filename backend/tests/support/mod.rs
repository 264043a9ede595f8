//! Shared harness for HTTP behaviour tests.
//!
//! Each request builds a fresh Actix service over the same catalogue, so state
//! persists across calls through the in-memory repository.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use movies_api::Trace;
use movies_api::inbound::http::health::HealthState;
use movies_api::inbound::http::state::{DEFAULT_BODY_LIMIT, HttpState};
use movies_api::inbound::http;
use movies_api::outbound::memory::InMemoryMovieRepository;
use movies_api::test_support::in_memory_catalogue;
use serde_json::{Value, json};

/// Response captured for assertions.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// In-process movies API over an in-memory store and a clock pinned to
/// 2024-06-15.
pub struct MoviesApi {
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
    pub repository: Arc<InMemoryMovieRepository>,
}

impl MoviesApi {
    pub fn new() -> Self {
        Self::with_body_limit(DEFAULT_BODY_LIMIT)
    }

    /// Same as [`MoviesApi::new`] with request bodies capped at `limit` bytes.
    pub fn with_body_limit(limit: usize) -> Self {
        let (catalogue, repository) = in_memory_catalogue();
        Self {
            state: web::Data::new(HttpState::new(catalogue).with_body_limit(limit)),
            health: web::Data::new(HealthState::new()),
            repository,
        }
    }

    pub async fn send(&self, request: TestRequest) -> Reply {
        let app = test::init_service(
            App::new()
                .app_data(self.state.clone())
                .app_data(self.health.clone())
                .wrap(Trace)
                .configure(http::configure),
        )
        .await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = test::read_body(response).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        Reply {
            status,
            headers,
            body,
        }
    }

    /// Flip the readiness flag the way the server does after binding.
    pub fn mark_ready(&self) {
        self.health.mark_ready();
    }

    /// Create a movie and return its identifier.
    pub async fn create(&self, movie: Value) -> i64 {
        let reply = self
            .send(TestRequest::post().uri("/api/movies").set_json(movie))
            .await;
        assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
        reply.body["id"].as_i64().expect("numeric id")
    }
}

pub fn inception() -> Value {
    json!({
        "title": "Inception",
        "launchDate": "2010-07-16",
        "rating": 8.8,
        "revenue": 825_500_000_i64,
    })
}

pub fn movie(title: &str, launch_date: &str) -> Value {
    json!({
        "title": title,
        "launchDate": launch_date,
        "rating": 7.5,
        "revenue": 1_000_000,
    })
}
