//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Movie catalogue.
    ///
    /// `rating` is `NUMERIC(3,1)` constrained to 0.0..=10.0.
    movies (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        title -> Text,
        launch_date -> Date,
        rating -> Numeric,
        revenue -> Int8,
    }
}
