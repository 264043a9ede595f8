//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod movie_repository;

#[cfg(test)]
pub use movie_repository::MockMovieRepository;
pub use movie_repository::{MovieLookup, MovieRepository, MovieRepositoryError};
