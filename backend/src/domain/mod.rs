//! Domain primitives, validation, and use-case services.
//!
//! Purpose: define the movie entity, the field rules it must satisfy, the
//! error taxonomy every adapter reports through, and the catalogue service
//! that orchestrates validation and persistence.
//!
//! Public surface:
//! - Movie, MovieDraft, NewMovie, MovieId, Rating: entity model.
//! - validate_one, validate_many, validate_launch_date_path: validation.
//! - Error: transport-agnostic failure taxonomy.
//! - MovieCatalogue: use-case service over the `MovieRepository` port.

pub mod error;
pub mod movie;
pub mod movie_service;
pub mod ports;
pub mod validation;

pub use self::error::{Error, FieldFormat, PathVariable, ValidationScope};
pub use self::movie::{Movie, MovieDraft, MovieId, NewMovie, Rating, RatingOutOfRange};
pub use self::movie_service::MovieCatalogue;
pub use self::ports::{MovieLookup, MovieRepository, MovieRepositoryError};
pub use self::validation::{
    Field, FieldErrors, validate_launch_date_path, validate_many, validate_one,
};
