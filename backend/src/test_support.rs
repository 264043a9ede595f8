//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for `cfg(test)` and the `test-support` feature.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use crate::domain::{MovieCatalogue, MovieDraft, MovieRepository};
use crate::outbound::memory::InMemoryMovieRepository;

/// Clock pinned to noon, server-local time, on a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    local_now: DateTime<Local>,
}

impl FixtureClock {
    /// Pin the clock to `date`.
    ///
    /// # Panics
    /// Panics when noon on `date` does not exist in the local timezone.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).expect("noon is a valid time");
        let local_now = Local
            .from_local_datetime(&noon)
            .single()
            .expect("unambiguous local noon");
        Self { local_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.local_now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local_now.with_timezone(&Utc)
    }
}

/// Date the fixture clock reports as "today".
///
/// # Panics
/// Never; the constant date is valid.
#[must_use]
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid fixture date")
}

/// Clock pinned to [`fixture_today`].
#[must_use]
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::on(fixture_today()))
}

/// Catalogue over a fresh in-memory store and the fixture clock.
#[must_use]
pub fn in_memory_catalogue() -> (MovieCatalogue, Arc<InMemoryMovieRepository>) {
    let repository = Arc::new(InMemoryMovieRepository::default());
    let store: Arc<dyn MovieRepository> = repository.clone();
    (MovieCatalogue::new(store, fixture_clock()), repository)
}

/// A valid draft for "Inception".
#[must_use]
pub fn inception_draft() -> MovieDraft {
    MovieDraft {
        title: Some("Inception".to_owned()),
        launch_date: NaiveDate::from_ymd_opt(2010, 7, 16),
        rating: Some(Decimal::new(88, 1)),
        revenue: Some(825_500_000),
    }
}
