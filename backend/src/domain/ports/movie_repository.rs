//! Port for movie persistence.
//!
//! The [`MovieRepository`] trait is the only way the domain touches stored
//! movies. Lookups that can miss return [`MovieLookup`] so every call site
//! handles the not-found case explicitly.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Movie, MovieId, NewMovie};

use super::define_port_error;

define_port_error! {
    /// Errors raised by movie repository adapters.
    pub enum MovieRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "movie repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "movie repository query failed: {message}",
    }
}

/// Outcome of a lookup that targets a single movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieLookup {
    /// The stored movie.
    Found(Movie),
    /// No movie has the identifier.
    NotFound,
}

impl MovieLookup {
    /// Convert into a result, building the miss error lazily.
    pub fn found_or_else<E>(self, missing: impl FnOnce() -> E) -> Result<Movie, E> {
        match self {
            Self::Found(movie) => Ok(movie),
            Self::NotFound => Err(missing()),
        }
    }
}

/// Port for movie storage and retrieval.
///
/// # Batch semantics
///
/// [`MovieRepository::create_many`] is a sequence of independent inserts.
/// A failure part-way through is returned to the caller and earlier inserts
/// remain committed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert a movie and return it with its assigned identifier.
    async fn create(&self, movie: &NewMovie) -> Result<Movie, MovieRepositoryError>;

    /// Insert movies one after another, preserving input order.
    async fn create_many(&self, movies: &[NewMovie]) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Fetch a movie by identifier.
    async fn find_by_id(&self, id: MovieId) -> Result<MovieLookup, MovieRepositoryError>;

    /// Fetch every stored movie ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Fetch movies whose launch date equals `launch_date`.
    async fn find_by_launch_date(
        &self,
        launch_date: NaiveDate,
    ) -> Result<Vec<Movie>, MovieRepositoryError>;

    /// Replace all fields of the movie stored under `id`.
    ///
    /// Returns [`MovieLookup::NotFound`] when no row matches.
    async fn update(
        &self,
        id: MovieId,
        movie: &NewMovie,
    ) -> Result<MovieLookup, MovieRepositoryError>;

    /// Remove the movie stored under `id`. Missing identifiers are a no-op.
    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError>;

    /// Remove every stored movie.
    async fn delete_all(&self) -> Result<(), MovieRepositoryError>;

    /// Confirm the store can currently serve requests.
    async fn ping(&self) -> Result<(), MovieRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lookup_found_yields_movie() {
        let movie = NewMovie {
            title: "Alien".to_owned(),
            launch_date: NaiveDate::from_ymd_opt(1979, 5, 25).expect("valid date"),
            rating: crate::domain::Rating::new(rust_decimal::Decimal::new(85, 1))
                .expect("valid rating"),
            revenue: 106_300_000,
        }
        .with_id(MovieId::new(3));

        let result = MovieLookup::Found(movie.clone()).found_or_else(|| "missing");
        assert_eq!(result, Ok(movie));
    }

    #[rstest]
    fn lookup_not_found_yields_error() {
        let result = MovieLookup::NotFound.found_or_else(|| "missing");
        assert_eq!(result, Err("missing"));
    }

    #[rstest]
    fn error_constructors_format_messages() {
        assert_eq!(
            MovieRepositoryError::connection("refused").to_string(),
            "movie repository connection failed: refused"
        );
        assert_eq!(
            MovieRepositoryError::query("syntax").to_string(),
            "movie repository query failed: syntax"
        );
    }
}
