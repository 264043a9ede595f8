//! PostgreSQL-backed `MovieRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{MovieLookup, MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieId, NewMovie, Rating};

use super::models::{MovieRow, MovieUpdate, NewMovieRow};
use super::pool::{DbPool, PoolError};
use super::schema::movies;

/// Diesel-backed implementation of the `MovieRepository` port.
#[derive(Clone)]
pub struct DieselMovieRepository {
    pool: DbPool,
}

impl DieselMovieRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MovieRepositoryError {
    MovieRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> MovieRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => MovieRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => MovieRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MovieRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            MovieRepositoryError::query("movie violates a table constraint")
        }
        _ => MovieRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain movie.
fn row_to_movie(row: MovieRow) -> Result<Movie, MovieRepositoryError> {
    let MovieRow {
        id,
        title,
        launch_date,
        rating,
        revenue,
    } = row;
    let rating = Rating::new(rating).map_err(|err| {
        MovieRepositoryError::query(format!("stored movie {id} has invalid rating: {err}"))
    })?;
    Ok(NewMovie {
        title,
        launch_date,
        rating,
        revenue,
    }
    .with_id(MovieId::new(id)))
}

fn rows_to_movies(rows: Vec<MovieRow>) -> Result<Vec<Movie>, MovieRepositoryError> {
    rows.into_iter().map(row_to_movie).collect()
}

#[async_trait]
impl MovieRepository for DieselMovieRepository {
    async fn create(&self, movie: &NewMovie) -> Result<Movie, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(movies::table)
            .values(NewMovieRow::from(movie))
            .returning(MovieRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_movie(row)
    }

    async fn create_many(&self, batch: &[NewMovie]) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Each insert commits on its own.
        let mut created = Vec::with_capacity(batch.len());
        for movie in batch {
            let row = diesel::insert_into(movies::table)
                .values(NewMovieRow::from(movie))
                .returning(MovieRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            created.push(row_to_movie(row)?);
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: MovieId) -> Result<MovieLookup, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MovieRow> = movies::table
            .find(id.get())
            .select(MovieRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_movie(row).map(MovieLookup::Found),
            None => Ok(MovieLookup::NotFound),
        }
    }

    async fn find_all(&self) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = movies::table
            .order(movies::id.asc())
            .select(MovieRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_movies(rows)
    }

    async fn find_by_launch_date(
        &self,
        launch_date: NaiveDate,
    ) -> Result<Vec<Movie>, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = movies::table
            .filter(movies::launch_date.eq(launch_date))
            .order(movies::id.asc())
            .select(MovieRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_movies(rows)
    }

    async fn update(
        &self,
        id: MovieId,
        movie: &NewMovie,
    ) -> Result<MovieLookup, MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MovieRow> = diesel::update(movies::table.find(id.get()))
            .set(MovieUpdate::from(movie))
            .returning(MovieRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_movie(row).map(MovieLookup::Found),
            None => Ok(MovieLookup::NotFound),
        }
    }

    async fn delete(&self, id: MovieId) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(movies::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_all(&self) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(movies::table)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn ping(&self) -> Result<(), MovieRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Row and error mapping checks; the queries themselves need PostgreSQL.

    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn row(rating: Decimal) -> MovieRow {
        MovieRow {
            id: 7,
            title: "Arrival".to_owned(),
            launch_date: NaiveDate::from_ymd_opt(2016, 11, 11).expect("valid date"),
            rating,
            revenue: 203_400_000,
        }
    }

    #[rstest]
    fn row_maps_to_domain_movie() {
        let movie = row_to_movie(row(Decimal::new(79, 1))).expect("valid row");

        assert_eq!(movie.id(), MovieId::new(7));
        assert_eq!(movie.title(), "Arrival");
        assert_eq!(movie.rating().value(), Decimal::new(79, 1));
    }

    #[rstest]
    fn out_of_range_rating_is_a_query_error() {
        let error = row_to_movie(row(Decimal::new(110, 1))).expect_err("invalid row");
        assert!(matches!(error, MovieRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, MovieRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(diesel::result::Error::NotFound, "record not found")]
    #[case(diesel::result::Error::RollbackTransaction, "database error")]
    fn diesel_errors_map_to_query_errors(
        #[case] error: diesel::result::Error,
        #[case] message: &str,
    ) {
        assert_eq!(map_diesel_error(error), MovieRepositoryError::query(message));
    }
}
