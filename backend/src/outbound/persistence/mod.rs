//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! The movie store runs on `diesel-async` connections checked out from a
//! `bb8` pool. Row structs (`models.rs`) and the table definition
//! (`schema.rs`) stay private to this module; only domain types cross the
//! port boundary, and every database failure becomes a
//! `MovieRepositoryError`.
//!
//! # Example
//!
//! ```no_run
//! use movies_api::outbound::persistence::{
//!     DbPool, DieselMovieRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://movies@localhost/movies";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repository = DieselMovieRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_movie_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_movie_repository::DieselMovieRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
