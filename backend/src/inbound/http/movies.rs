//! Movie API handlers.
//!
//! ```text
//! POST   /api/movies                      create one movie
//! POST   /api/movies/list                 create a batch
//! GET    /api/movies                      list every movie
//! GET    /api/movies/{id}                 fetch one movie
//! GET    /api/movies/launchDate/{date}    movies released on a date
//! PUT    /api/movies/{id}                 replace a movie's fields
//! DELETE /api/movies/{id}                 delete one movie
//! DELETE /api/movies                      delete every movie
//! ```
//!
//! Handlers parse path segments before reading the body so a malformed path
//! is reported ahead of body format and validation failures.

use actix_web::{HttpRequest, HttpResponse, Route, web};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Movie};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorDetails;
use crate::inbound::http::payload::{decode_movie, decode_movie_list, read_body};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_launch_date, parse_movie_id};

/// Movie body accepted by create and update.
///
/// Every field is optional on the wire; missing values are reported as
/// validation errors. `rating` and `revenue` may also be sent as strings.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    /// Required, non-empty.
    #[schema(example = "Inception")]
    pub title: Option<String>,
    /// `yyyy-MM-dd`, not after today.
    #[schema(value_type = Option<String>, format = Date, example = "2010-07-16")]
    pub launch_date: Option<NaiveDate>,
    /// Between 0.0 and 10.0; rounded to one decimal place.
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 8.8)]
    pub rating: Option<Decimal>,
    /// Box-office revenue.
    #[schema(example = 825_500_000)]
    pub revenue: Option<i64>,
}

/// Movie returned by every successful read or write.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Inception")]
    pub title: String,
    #[schema(value_type = String, format = Date, example = "2010-07-16")]
    pub launch_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 8.8)]
    pub rating: Decimal,
    #[schema(example = 825_500_000)]
    pub revenue: i64,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id().get(),
            title: movie.title().to_owned(),
            launch_date: movie.launch_date(),
            rating: movie.rating().value(),
            revenue: movie.revenue(),
        }
    }
}

fn to_responses(movies: Vec<Movie>) -> Vec<MovieResponse> {
    movies.into_iter().map(MovieResponse::from).collect()
}

/// Create a movie.
#[utoipa::path(
    post,
    path = "/api/movies",
    request_body = MovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 400, description = "Invalid or malformed movie", body = ErrorDetails),
        (status = 413, description = "Body exceeds the configured limit", body = ErrorDetails),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "createMovie"
)]
pub async fn create_movie(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload, state.body_limit).await?;
    let draft = decode_movie(&body)?;
    let movie = state.catalogue.create(draft).await?;
    Ok(HttpResponse::Created().json(MovieResponse::from(movie)))
}

/// Create a batch of movies.
///
/// The batch is rejected as a whole when any element is malformed or
/// invalid; field errors are merged across elements.
#[utoipa::path(
    post,
    path = "/api/movies/list",
    request_body = Vec<MovieRequest>,
    responses(
        (status = 201, description = "Movies created", body = [MovieResponse]),
        (status = 400, description = "Invalid or malformed movie list", body = ErrorDetails),
        (status = 413, description = "Body exceeds the configured limit", body = ErrorDetails),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "createMovies"
)]
pub async fn create_movies(
    state: web::Data<HttpState>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let body = read_body(payload, state.body_limit).await?;
    let drafts = decode_movie_list(&body)?;
    let movies = state.catalogue.create_all(drafts).await?;
    Ok(HttpResponse::Created().json(to_responses(movies)))
}

/// Fetch a movie by identifier.
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = String, Path, description = "Signed 64-bit movie identifier")),
    responses(
        (status = 200, description = "Movie found", body = MovieResponse),
        (status = 400, description = "Malformed identifier", body = ErrorDetails),
        (status = 404, description = "Movie not found", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "findMovieById"
)]
pub async fn find_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_movie_id(&path)?;
    let movie = state.catalogue.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(MovieResponse::from(movie)))
}

/// List every stored movie in identifier order.
#[utoipa::path(
    get,
    path = "/api/movies",
    responses(
        (status = 200, description = "All movies", body = [MovieResponse]),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "findAllMovies"
)]
pub async fn find_all_movies(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let movies = state.catalogue.find_all().await?;
    Ok(HttpResponse::Ok().json(to_responses(movies)))
}

/// List movies released on a date that is not in the future.
#[utoipa::path(
    get,
    path = "/api/movies/launchDate/{launchDate}",
    params(("launchDate" = String, Path, description = "Release date as yyyy-MM-dd")),
    responses(
        (status = 200, description = "Movies released on the date", body = [MovieResponse]),
        (status = 400, description = "Malformed or future date", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "findMoviesByLaunchDate"
)]
pub async fn find_movies_by_launch_date(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let launch_date = parse_launch_date(&path)?;
    let movies = state.catalogue.find_by_launch_date(launch_date).await?;
    Ok(HttpResponse::Ok().json(to_responses(movies)))
}

/// Replace every field of an existing movie.
///
/// The identifier comes from the path; any `id` in the body is ignored.
#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    params(("id" = String, Path, description = "Signed 64-bit movie identifier")),
    request_body = MovieRequest,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponse),
        (status = 400, description = "Invalid identifier or movie", body = ErrorDetails),
        (status = 404, description = "Movie not found", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "updateMovie"
)]
pub async fn update_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let id = parse_movie_id(&path)?;
    let body = read_body(payload, state.body_limit).await?;
    let draft = decode_movie(&body)?;
    let movie = state.catalogue.update(id, draft).await?;
    Ok(HttpResponse::Ok().json(MovieResponse::from(movie)))
}

/// Delete a movie. Succeeds whether or not the movie exists.
#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    params(("id" = String, Path, description = "Signed 64-bit movie identifier")),
    responses(
        (status = 204, description = "Movie deleted or absent"),
        (status = 400, description = "Malformed identifier", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "deleteMovie"
)]
pub async fn delete_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_movie_id(&path)?;
    state.catalogue.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every movie.
#[utoipa::path(
    delete,
    path = "/api/movies",
    responses(
        (status = 204, description = "All movies deleted"),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    ),
    tags = ["movies"],
    operation_id = "deleteAllMovies"
)]
pub async fn delete_all_movies(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.catalogue.delete_all().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route answering 405 with the methods a resource does accept.
fn reject_other_methods(allowed: &'static [&'static str]) -> Route {
    web::to(move |req: HttpRequest| async move {
        Err::<HttpResponse, _>(Error::method_not_allowed(
            req.method().as_str(),
            allowed.iter().copied(),
        ))
    })
}

/// Register the movie resources.
///
/// Literal segments are registered ahead of `/api/movies/{id}` so `list`
/// and `launchDate` are never parsed as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use movies_api::inbound::http::movies;
///
/// let app = App::new().configure(movies::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/movies")
            .route(web::get().to(find_all_movies))
            .route(web::post().to(create_movie))
            .route(web::delete().to(delete_all_movies))
            .default_service(reject_other_methods(&["GET", "POST", "DELETE"])),
    )
    .service(
        web::resource("/api/movies/list")
            .route(web::post().to(create_movies))
            .default_service(reject_other_methods(&["POST"])),
    )
    .service(
        web::resource("/api/movies/launchDate/{launchDate}")
            .route(web::get().to(find_movies_by_launch_date))
            .default_service(reject_other_methods(&["GET"])),
    )
    .service(
        web::resource("/api/movies/{id}")
            .route(web::get().to(find_movie))
            .route(web::put().to(update_movie))
            .route(web::delete().to(delete_movie))
            .default_service(reject_other_methods(&["GET", "PUT", "DELETE"])),
    );
}
