//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use movies_api::Trace;
#[cfg(debug_assertions)]
use movies_api::doc::ApiDoc;
use movies_api::domain::{MovieCatalogue, MovieRepository};
use movies_api::inbound::http;
use movies_api::inbound::http::health::HealthState;
use movies_api::inbound::http::state::HttpState;
use movies_api::outbound::memory::InMemoryMovieRepository;
use movies_api::outbound::persistence::{DbPool, DieselMovieRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Pick the movie store: PostgreSQL when a pool is configured, memory otherwise.
fn build_repository(db_pool: Option<DbPool>) -> Arc<dyn MovieRepository> {
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL movie store");
            Arc::new(DieselMovieRepository::new(pool))
        }
        None => {
            warn!("no database configured; movies are kept in memory");
            Arc::new(InMemoryMovieRepository::default())
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        body_limit,
    } = config;
    let catalogue = MovieCatalogue::new(build_repository(db_pool), Arc::new(DefaultClock));
    let http_state = web::Data::new(HttpState::new(catalogue).with_body_limit(body_limit));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "movies API listening");
    health_state.mark_ready();
    Ok(server)
}
