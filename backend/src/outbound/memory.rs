//! Process-local movie store.
//!
//! Used when no database URL is configured and by the HTTP test suites.
//! Identifiers start at 1 and are never reused, matching a `BIGSERIAL`
//! column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::ports::{MovieLookup, MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieId, NewMovie};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<MovieId, Movie>,
}

impl Table {
    fn insert(&mut self, movie: &NewMovie) -> Result<Movie, MovieRepositoryError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| MovieRepositoryError::query("movie identifier sequence exhausted"))?;
        self.last_id = next;
        let stored = movie.clone().with_id(MovieId::new(next));
        self.rows.insert(stored.id(), stored.clone());
        Ok(stored)
    }
}

/// In-memory implementation of the [`MovieRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    table: RwLock<Table>,
}

impl InMemoryMovieRepository {
    /// Number of stored movies.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, movie: &NewMovie) -> Result<Movie, MovieRepositoryError> {
        self.table.write().await.insert(movie)
    }

    async fn create_many(&self, movies: &[NewMovie]) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut table = self.table.write().await;
        movies.iter().map(|movie| table.insert(movie)).collect()
    }

    async fn find_by_id(&self, id: MovieId) -> Result<MovieLookup, MovieRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .cloned()
            .map_or(MovieLookup::NotFound, MovieLookup::Found))
    }

    async fn find_all(&self) -> Result<Vec<Movie>, MovieRepositoryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_launch_date(
        &self,
        launch_date: NaiveDate,
    ) -> Result<Vec<Movie>, MovieRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|movie| movie.launch_date() == launch_date)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: MovieId,
        movie: &NewMovie,
    ) -> Result<MovieLookup, MovieRepositoryError> {
        let mut table = self.table.write().await;
        Ok(match table.rows.get_mut(&id) {
            Some(stored) => {
                *stored = movie.clone().with_id(id);
                MovieLookup::Found(stored.clone())
            }
            None => MovieLookup::NotFound,
        })
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), MovieRepositoryError> {
        self.table.write().await.rows.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), MovieRepositoryError> {
        Ok(())
    }
}
