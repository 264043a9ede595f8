//! Movie data model.
//!
//! A [`MovieDraft`] is whatever the client sent, with every field optional.
//! Validation turns it into a [`NewMovie`], the only shape the store accepts.
//! The store assigns a [`MovieId`] and hands back a persisted [`Movie`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::validation::{FieldErrors, validate_one};

/// Store-assigned movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MovieId(i64);

impl MovieId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Movie rating on the 0.0 to 10.0 scale.
///
/// ## Invariants
/// - The value lies within [`Rating::MIN`] and [`Rating::MAX`] inclusive.
/// - The value carries at most one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(Decimal);

/// Reason a raw decimal cannot become a [`Rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 0.0 and 10.0")]
pub struct RatingOutOfRange;

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: Decimal = Decimal::ZERO;
    /// Highest accepted rating.
    pub const MAX: Decimal = Decimal::TEN;

    /// Validate the range and normalise to one decimal place.
    ///
    /// The range check runs on the raw value so `10.04` is rejected rather
    /// than rounded into range.
    ///
    /// # Examples
    /// ```
    /// use movies_api::domain::Rating;
    /// use rust_decimal::Decimal;
    ///
    /// let rating = Rating::new(Decimal::new(885, 2)).expect("in range");
    /// assert_eq!(rating.value(), Decimal::new(88, 1));
    /// assert!(Rating::new(Decimal::new(-1, 1)).is_err());
    /// ```
    pub fn new(raw: Decimal) -> Result<Self, RatingOutOfRange> {
        if raw < Self::MIN || raw > Self::MAX {
            return Err(RatingOutOfRange);
        }
        Ok(Self(raw.round_dp(1).normalize()))
    }

    /// Canonical decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Client-supplied movie fields before validation.
///
/// Absent JSON fields and explicit `null` both decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    /// Title as sent; may be empty.
    pub title: Option<String>,
    /// Release date, already in `yyyy-MM-dd` form.
    pub launch_date: Option<NaiveDate>,
    /// Raw rating before range checking and rounding.
    pub rating: Option<Decimal>,
    /// Box-office revenue.
    pub revenue: Option<i64>,
}

impl MovieDraft {
    /// Validate every field against `today`, reporting all failures at once.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use movies_api::domain::{Field, MovieDraft};
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    /// let errors = MovieDraft::default().validate(today).expect_err("empty draft");
    /// assert_eq!(errors.len(), 4);
    /// assert!(errors.get(Field::Title).is_some());
    /// ```
    pub fn validate(self, today: NaiveDate) -> Result<NewMovie, FieldErrors> {
        let errors = validate_one(&self, today);
        let Self {
            title: Some(title),
            launch_date: Some(launch_date),
            rating: Some(rating),
            revenue: Some(revenue),
        } = self
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        match Rating::new(rating) {
            Ok(rating) => Ok(NewMovie {
                title,
                launch_date,
                rating,
                revenue,
            }),
            Err(_) => Err(errors),
        }
    }
}

/// Validated movie fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    /// Non-empty title.
    pub title: String,
    /// Release date, never after the validation date.
    pub launch_date: NaiveDate,
    /// Range-checked rating with one decimal place.
    pub rating: Rating,
    /// Box-office revenue.
    pub revenue: i64,
}

impl NewMovie {
    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: MovieId) -> Movie {
        Movie { id, fields: self }
    }
}

/// Persisted movie record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    id: MovieId,
    fields: NewMovie,
}

impl Movie {
    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> MovieId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.fields.title.as_str()
    }

    #[must_use]
    pub const fn launch_date(&self) -> NaiveDate {
        self.fields.launch_date
    }

    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.fields.rating
    }

    #[must_use]
    pub const fn revenue(&self) -> i64 {
        self.fields.revenue
    }

    /// Borrow the validated field set.
    #[must_use]
    pub const fn fields(&self) -> &NewMovie {
        &self.fields
    }
}
