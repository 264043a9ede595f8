//! Movie request body decoding.
//!
//! Bodies are read as raw JSON and each recognised field is parsed on its
//! own, so a wrong-typed `launchDate`, `rating` or `revenue` is reported as a
//! [`FieldFormat`] rather than as parser text. Every field (and every element
//! of a list body) is inspected before failing. `id` and unknown keys are
//! ignored. Bodies are read up to a configured size; larger bodies fail with
//! [`Error::PayloadTooLarge`] instead of the framework's plain-text 413.
//!
//! ```text
//! {"title":"Inception","launchDate":"2010-07-16","rating":8.8,"revenue":825500000}
//! ```

use std::collections::BTreeSet;
use std::str::FromStr;

use actix_web::web;
use chrono::NaiveDate;
use futures_util::StreamExt;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::domain::{Error, FieldFormat, MovieDraft};

/// Wire format for dates in bodies and paths.
const DATE_FORMAT: &str = "%Y-%m-%d";

type Object = Map<String, Value>;

/// Parse a strict `yyyy-MM-dd` date.
///
/// The raw text must be exactly four, two and two ASCII digits separated by
/// hyphens; chrono alone would also take `2010-7-6` or `+2010-07-16`.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Collect a request body, failing once it grows past `limit` bytes.
///
/// # Errors
/// [`Error::PayloadTooLarge`] past the limit, [`Error::UnreadableBody`] when
/// the transport fails mid-stream.
pub async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::Bytes, Error> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|error| Error::unreadable_body(error.to_string()))?;
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(Error::PayloadTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

fn unreadable(error: &serde_json::Error) -> Error {
    Error::unreadable_body(error.to_string())
}

fn parse_json(body: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(body).map_err(|error| unreadable(&error))
}

fn as_object(value: Value) -> Result<Object, Error> {
    serde_json::from_value(value).map_err(|error| unreadable(&error))
}

fn field<'a>(object: &'a Object, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

// Scalars coerce to text; arrays and objects keep the decoder message.
fn read_title(object: &Object) -> Result<Option<String>, Error> {
    field(object, "title")
        .map(|value| match value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => serde_json::from_value::<String>(other.clone())
                .map_err(|error| unreadable(&error)),
        })
        .transpose()
}

fn read_launch_date(value: &Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date)
}

fn read_rating(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

fn read_revenue(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn read_typed<T>(
    object: &Object,
    name: &str,
    format: FieldFormat,
    read: fn(&Value) -> Option<T>,
    failures: &mut BTreeSet<FieldFormat>,
) -> Option<T> {
    let value = field(object, name)?;
    let parsed = read(value);
    if parsed.is_none() {
        failures.insert(format);
    }
    parsed
}

fn read_draft(object: &Object, failures: &mut BTreeSet<FieldFormat>) -> Result<MovieDraft, Error> {
    let title = read_title(object)?;
    Ok(MovieDraft {
        title,
        launch_date: read_typed(
            object,
            "launchDate",
            FieldFormat::LaunchDate,
            read_launch_date,
            failures,
        ),
        rating: read_typed(object, "rating", FieldFormat::Rating, read_rating, failures),
        revenue: read_typed(object, "revenue", FieldFormat::Revenue, read_revenue, failures),
    })
}

fn finish<T>(value: T, failures: BTreeSet<FieldFormat>) -> Result<T, Error> {
    if failures.is_empty() {
        Ok(value)
    } else {
        Err(Error::MalformedFields(failures))
    }
}

/// Decode a single movie body.
///
/// # Examples
/// ```
/// use movies_api::domain::{Error, FieldFormat};
/// use movies_api::inbound::http::payload::decode_movie;
///
/// let draft = decode_movie(br#"{"title":"Up","rating":"8.3"}"#).expect("decodes");
/// assert_eq!(draft.title.as_deref(), Some("Up"));
/// assert!(draft.launch_date.is_none());
///
/// let error = decode_movie(br#"{"revenue":"lots"}"#).expect_err("bad revenue");
/// assert_eq!(error, Error::malformed_fields([FieldFormat::Revenue]));
/// ```
pub fn decode_movie(body: &[u8]) -> Result<MovieDraft, Error> {
    let object = as_object(parse_json(body)?)?;
    let mut failures = BTreeSet::new();
    let draft = read_draft(&object, &mut failures)?;
    finish(draft, failures)
}

/// Decode a JSON array of movie bodies.
pub fn decode_movie_list(body: &[u8]) -> Result<Vec<MovieDraft>, Error> {
    let elements: Vec<Value> =
        serde_json::from_value(parse_json(body)?).map_err(|error| unreadable(&error))?;

    let mut failures = BTreeSet::new();
    let drafts = elements
        .into_iter()
        .map(|element| as_object(element).and_then(|object| read_draft(&object, &mut failures)))
        .collect::<Result<Vec<_>, _>>()?;
    finish(drafts, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_complete_movie() {
        let draft = decode_movie(
            br#"{"id":99,"title":"Inception","launchDate":"2010-07-16","rating":8.8,"revenue":825500000,"genre":"sci-fi"}"#,
        )
        .expect("decodes");

        assert_eq!(draft.title.as_deref(), Some("Inception"));
        assert_eq!(draft.launch_date, NaiveDate::from_ymd_opt(2010, 7, 16));
        assert_eq!(draft.rating, Some(Decimal::new(88, 1)));
        assert_eq!(draft.revenue, Some(825_500_000));
    }

    #[rstest]
    fn null_and_absent_fields_become_none() {
        let draft = decode_movie(br#"{"title":null,"rating":null}"#).expect("decodes");
        assert_eq!(draft, MovieDraft::default());
    }

    #[rstest]
    #[case(r#"{"rating":"8.85"}"#, Decimal::new(885, 2))]
    #[case(r#"{"rating":10}"#, Decimal::TEN)]
    #[case(r#"{"rating":1e1}"#, Decimal::TEN)]
    #[case(r#"{"rating":-0.1}"#, Decimal::new(-1, 1))]
    fn rating_accepts_numbers_and_numeric_strings(#[case] body: &str, #[case] expected: Decimal) {
        let draft = decode_movie(body.as_bytes()).expect("decodes");
        assert_eq!(
            draft.rating.map(|rating| rating.normalize()),
            Some(expected.normalize())
        );
    }

    #[rstest]
    #[case(r#"{"launchDate":"16/07/2010"}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"launchDate":20100716}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"launchDate":"2010-7-6"}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"launchDate":"+2010-07-16"}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"launchDate":"2010-07-16T00:00"}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"launchDate":"2010-02-30"}"#, FieldFormat::LaunchDate)]
    #[case(r#"{"rating":"high"}"#, FieldFormat::Rating)]
    #[case(r#"{"rating":true}"#, FieldFormat::Rating)]
    #[case(r#"{"revenue":"lots"}"#, FieldFormat::Revenue)]
    #[case(r#"{"revenue":1.5}"#, FieldFormat::Revenue)]
    #[case(r#"{"revenue":9223372036854775808}"#, FieldFormat::Revenue)]
    fn wrong_types_are_structural(#[case] body: &str, #[case] format: FieldFormat) {
        let error = decode_movie(body.as_bytes()).expect_err("format failure");
        assert_eq!(error, Error::malformed_fields([format]));
    }

    #[rstest]
    fn every_malformed_field_is_reported() {
        let error = decode_movie(br#"{"launchDate":"soon","rating":"x","revenue":[]}"#)
            .expect_err("format failures");
        assert_eq!(
            error,
            Error::malformed_fields([
                FieldFormat::LaunchDate,
                FieldFormat::Rating,
                FieldFormat::Revenue,
            ])
        );
    }

    #[rstest]
    #[case(r#"{"title":"#)]
    #[case("")]
    #[case("[1, 2]")]
    #[case(r#"{"title":["Inception"]}"#)]
    #[case(r#"{"title":{"en":"Inception"}}"#)]
    fn unreadable_bodies_keep_decoder_message(#[case] body: &str) {
        let error = decode_movie(body.as_bytes()).expect_err("unreadable");
        let Error::UnreadableBody { message } = error else {
            panic!("expected unreadable body, got {error:?}");
        };
        assert!(!message.is_empty());
    }

    #[rstest]
    #[case(r#"{"title":42}"#, "42")]
    #[case(r#"{"title":1.5}"#, "1.5")]
    #[case(r#"{"title":true}"#, "true")]
    fn scalar_titles_are_coerced_to_text(#[case] body: &str, #[case] expected: &str) {
        let draft = decode_movie(body.as_bytes()).expect("decodes");
        assert_eq!(draft.title.as_deref(), Some(expected));
    }

    #[rstest]
    #[case("2010-07-16", NaiveDate::from_ymd_opt(2010, 7, 16))]
    #[case("2024-02-29", NaiveDate::from_ymd_opt(2024, 2, 29))]
    #[case("2010-7-16", None)]
    #[case("2010-07-6", None)]
    #[case("+2010-07-16", None)]
    #[case("-010-07-16", None)]
    #[case(" 2010-07-16", None)]
    #[case("2010/07/16", None)]
    #[case("2023-02-29", None)]
    fn dates_must_match_the_wire_shape(#[case] raw: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(raw), expected);
    }

    #[rstest]
    fn list_collects_failures_across_elements() {
        let error = decode_movie_list(
            br#"[{"title":"A","rating":"x"},{"title":"B"},{"title":"C","revenue":"y"}]"#,
        )
        .expect_err("format failures");
        assert_eq!(
            error,
            Error::malformed_fields([FieldFormat::Rating, FieldFormat::Revenue])
        );
    }

    #[rstest]
    fn list_rejects_non_array_body() {
        let error = decode_movie_list(br#"{"title":"A"}"#).expect_err("not a list");
        assert!(matches!(error, Error::UnreadableBody { .. }));
    }

    #[rstest]
    fn list_preserves_order() {
        let drafts = decode_movie_list(br#"[{"title":"A"},{"title":"B"}]"#).expect("decodes");
        let titles: Vec<_> = drafts.iter().filter_map(|d| d.title.as_deref()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
