//! Field-level validation for movie drafts.
//!
//! Every predicate reports at most one message for its field, and validation
//! never stops at the first failure: clients receive the full set of invalid
//! fields in a single response.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::movie::{MovieDraft, Rating};

/// Title absent, null or empty.
pub const TITLE_REQUIRED: &str = "Title cannot be empty or null";
/// Launch date absent or null.
pub const LAUNCH_DATE_REQUIRED: &str = "Launch date cannot be empty or null";
/// Launch date after today in a request body.
pub const LAUNCH_DATE_IN_FUTURE: &str = "Launch date must be in the past or present";
/// Rating absent or null.
pub const RATING_REQUIRED: &str = "Rating cannot be null";
/// Rating below 0.0 or above 10.0.
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 0.0 and 10.0";
/// Revenue absent or null.
pub const REVENUE_REQUIRED: &str = "Revenue cannot be null";
/// Message attached to a future launch date supplied as a path segment.
pub const LAUNCH_DATE_PATH_IN_FUTURE: &str = "must be in the past or present";

/// Movie fields that can carry a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// `title`
    Title,
    /// `launchDate`
    LaunchDate,
    /// `rating`
    Rating,
    /// `revenue`
    Revenue,
}

impl Field {
    /// Wire name used in JSON bodies and error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::LaunchDate => "launchDate",
            Self::Rating => "rating",
            Self::Revenue => "revenue",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable field-to-message mapping.
///
/// Keys are unique: a later message for a field already present is dropped,
/// so merging batch results keeps the first failure seen for each field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping holding a single diagnostic.
    #[must_use]
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        Self::new().with(field, message)
    }

    /// Return a copy extended with `field`, keeping any existing message.
    #[must_use]
    pub fn with(mut self, field: Field, message: impl Into<String>) -> Self {
        self.0.entry(field).or_insert_with(|| message.into());
        self
    }

    /// Union of two mappings; entries already in `self` win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Iterate entries in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |errors, (field, message)| errors.with(field, message))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, message) in &self.0 {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}

fn check_title(title: Option<&str>) -> Option<&'static str> {
    match title {
        Some(value) if !value.is_empty() => None,
        _ => Some(TITLE_REQUIRED),
    }
}

fn check_launch_date(launch_date: Option<NaiveDate>, today: NaiveDate) -> Option<&'static str> {
    match launch_date {
        None => Some(LAUNCH_DATE_REQUIRED),
        Some(date) if !is_past_or_present(date, today) => Some(LAUNCH_DATE_IN_FUTURE),
        Some(_) => None,
    }
}

fn check_rating(rating: Option<Decimal>) -> Option<&'static str> {
    match rating {
        None => Some(RATING_REQUIRED),
        Some(raw) if Rating::new(raw).is_err() => Some(RATING_OUT_OF_RANGE),
        Some(_) => None,
    }
}

fn check_revenue(revenue: Option<i64>) -> Option<&'static str> {
    revenue.map_or(Some(REVENUE_REQUIRED), |_| None)
}

/// Date predicate shared by body fields and path segments.
#[must_use]
pub fn is_past_or_present(date: NaiveDate, today: NaiveDate) -> bool {
    date <= today
}

/// Apply every field predicate to `draft`; an empty result means valid.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use movies_api::domain::{Field, MovieDraft, validate_one};
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
/// let draft = MovieDraft {
///     title: Some(String::new()),
///     ..MovieDraft::default()
/// };
/// let errors = validate_one(&draft, today);
/// assert_eq!(errors.get(Field::Title), Some("Title cannot be empty or null"));
/// assert_eq!(errors.len(), 4);
/// ```
#[must_use]
pub fn validate_one(draft: &MovieDraft, today: NaiveDate) -> FieldErrors {
    [
        (Field::Title, check_title(draft.title.as_deref())),
        (Field::LaunchDate, check_launch_date(draft.launch_date, today)),
        (Field::Rating, check_rating(draft.rating)),
        (Field::Revenue, check_revenue(draft.revenue)),
    ]
    .into_iter()
    .filter_map(|(field, failure)| failure.map(|message| (field, message.to_owned())))
    .collect()
}

/// Union of [`validate_one`] across a batch, keyed purely by field name.
///
/// The result does not record which element failed.
#[must_use]
pub fn validate_many<'a, I>(drafts: I, today: NaiveDate) -> FieldErrors
where
    I: IntoIterator<Item = &'a MovieDraft>,
{
    drafts
        .into_iter()
        .fold(FieldErrors::new(), |acc, draft| {
            acc.merge(validate_one(draft, today))
        })
}

/// Validate a launch date supplied as a path segment.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use movies_api::domain::{Field, validate_launch_date_path};
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
/// let future = NaiveDate::from_ymd_opt(2999, 1, 1).expect("valid date");
/// let errors = validate_launch_date_path(future, today).expect_err("future date");
/// assert_eq!(errors.get(Field::LaunchDate), Some("must be in the past or present"));
/// ```
pub fn validate_launch_date_path(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, FieldErrors> {
    if is_past_or_present(date, today) {
        Ok(date)
    } else {
        Err(FieldErrors::single(
            Field::LaunchDate,
            LAUNCH_DATE_PATH_IN_FUTURE,
        ))
    }
}

#[cfg(test)]
mod tests;
