//! Movie catalogue service sitting between inbound adapters and the store.
//!
//! Drafts are validated here, before any repository call, so invalid input
//! never reaches persistence. Store misses become [`Error::MovieNotFound`];
//! adapter failures become [`Error::Internal`] with the adapter message kept
//! for logging.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, warn};

use super::error::{Error, ValidationScope};
use super::movie::{Movie, MovieDraft, MovieId, NewMovie};
use super::ports::{MovieRepository, MovieRepositoryError};
use super::validation::{validate_launch_date_path, validate_many};

fn map_repository_error(error: MovieRepositoryError) -> Error {
    warn!(%error, "movie repository call failed");
    Error::internal(error.to_string())
}

/// Use-case service for the movie endpoints.
#[derive(Clone)]
pub struct MovieCatalogue {
    repository: Arc<dyn MovieRepository>,
    clock: Arc<dyn Clock>,
}

impl MovieCatalogue {
    /// Create a catalogue backed by `repository`, reading dates from `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use movies_api::domain::MovieCatalogue;
    /// # use movies_api::outbound::memory::InMemoryMovieRepository;
    /// let catalogue = MovieCatalogue::new(
    ///     Arc::new(InMemoryMovieRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(repository: Arc<dyn MovieRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Server-local calendar date used by the date predicates.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    fn validate(&self, draft: MovieDraft) -> Result<NewMovie, Error> {
        draft
            .validate(self.today())
            .map_err(|errors| Error::validation(ValidationScope::Movie, errors))
    }

    /// Validate and store one movie.
    pub async fn create(&self, draft: MovieDraft) -> Result<Movie, Error> {
        let movie = self.validate(draft)?;
        let created = self
            .repository
            .create(&movie)
            .await
            .map_err(map_repository_error)?;
        debug!(id = %created.id(), "movie created");
        Ok(created)
    }

    /// Validate every draft, then store them in order.
    ///
    /// Any invalid draft rejects the whole batch before the store is called.
    pub async fn create_all(&self, drafts: Vec<MovieDraft>) -> Result<Vec<Movie>, Error> {
        let today = self.today();
        let errors = validate_many(&drafts, today);
        if !errors.is_empty() {
            return Err(Error::validation(ValidationScope::MovieList, errors));
        }
        let movies = drafts
            .into_iter()
            .map(|draft| draft.validate(today))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|errors| Error::validation(ValidationScope::MovieList, errors))?;
        let created = self
            .repository
            .create_many(&movies)
            .await
            .map_err(map_repository_error)?;
        debug!(count = created.len(), "movies created");
        Ok(created)
    }

    /// Fetch one movie or fail with [`Error::MovieNotFound`].
    pub async fn find_by_id(&self, id: MovieId) -> Result<Movie, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .found_or_else(|| Error::MovieNotFound(id))
    }

    pub async fn find_all(&self) -> Result<Vec<Movie>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    /// Movies launched on `launch_date`; future dates are rejected.
    pub async fn find_by_launch_date(&self, launch_date: NaiveDate) -> Result<Vec<Movie>, Error> {
        let launch_date = validate_launch_date_path(launch_date, self.today())
            .map_err(|errors| Error::validation(ValidationScope::LaunchDatePath, errors))?;
        self.repository
            .find_by_launch_date(launch_date)
            .await
            .map_err(map_repository_error)
    }

    /// Validate and replace the movie stored under `id`.
    pub async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, Error> {
        let movie = self.validate(draft)?;
        self.repository
            .update(id, &movie)
            .await
            .map_err(map_repository_error)?
            .found_or_else(|| Error::MovieNotFound(id))
    }

    /// Remove one movie; unknown identifiers succeed silently.
    pub async fn delete(&self, id: MovieId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }

    pub async fn delete_all(&self) -> Result<(), Error> {
        self.repository
            .delete_all()
            .await
            .map_err(map_repository_error)
    }

    /// Report whether the backing store answers a round trip.
    pub async fn check_store(&self) -> Result<(), Error> {
        self.repository.ping().await.map_err(map_repository_error)
    }
}
