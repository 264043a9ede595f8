//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::NewMovie;

use super::schema::movies;

/// Row struct for reading from the movies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MovieRow {
    pub id: i64,
    pub title: String,
    pub launch_date: NaiveDate,
    pub rating: Decimal,
    pub revenue: i64,
}

/// Insertable struct for creating movie records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = movies)]
pub(crate) struct NewMovieRow<'a> {
    pub title: &'a str,
    pub launch_date: NaiveDate,
    pub rating: Decimal,
    pub revenue: i64,
}

impl<'a> From<&'a NewMovie> for NewMovieRow<'a> {
    fn from(movie: &'a NewMovie) -> Self {
        Self {
            title: movie.title.as_str(),
            launch_date: movie.launch_date,
            rating: movie.rating.value(),
            revenue: movie.revenue,
        }
    }
}

/// Changeset replacing every mutable column of a movie.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = movies)]
pub(crate) struct MovieUpdate<'a> {
    pub title: &'a str,
    pub launch_date: NaiveDate,
    pub rating: Decimal,
    pub revenue: i64,
}

impl<'a> From<&'a NewMovie> for MovieUpdate<'a> {
    fn from(movie: &'a NewMovie) -> Self {
        Self {
            title: movie.title.as_str(),
            launch_date: movie.launch_date,
            rating: movie.rating.value(),
            revenue: movie.revenue,
        }
    }
}
