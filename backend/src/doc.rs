//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every movie endpoint, the health probes, and the
//! request, response and error schemas. Swagger UI serves it at `/docs` in
//! debug builds.

use crate::inbound::http::error::ErrorDetails;
use crate::inbound::http::movies::{MovieRequest, MovieResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        description = "CRUD interface for a movie catalogue with structured error payloads."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::create_movie,
        crate::inbound::http::movies::create_movies,
        crate::inbound::http::movies::find_movie,
        crate::inbound::http::movies::find_all_movies,
        crate::inbound::http::movies::find_movies_by_launch_date,
        crate::inbound::http::movies::update_movie,
        crate::inbound::http::movies::delete_movie,
        crate::inbound::http::movies::delete_all_movies,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(MovieRequest, MovieResponse, ErrorDetails)),
    tags(
        (name = "movies", description = "Movie catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("MovieResponse", &["id", "title", "launchDate", "rating", "revenue"][..])]
    #[case("ErrorDetails", &["timestamp", "title", "status", "detail", "path", "fieldErrors"][..])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/movies")]
    #[case("/api/movies/list")]
    #[case("/api/movies/{id}")]
    #[case("/api/movies/launchDate/{launchDate}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
