//! Path segment parsing for inbound HTTP adapters.

use chrono::NaiveDate;

use crate::domain::{Error, MovieId, PathVariable};
use crate::inbound::http::payload::parse_date;

pub(crate) fn parse_movie_id(raw: &str) -> Result<MovieId, Error> {
    raw.parse()
        .map_err(|_| Error::MalformedPathVariable(PathVariable::Id))
}

pub(crate) fn parse_launch_date(raw: &str) -> Result<NaiveDate, Error> {
    parse_date(raw).ok_or(Error::MalformedPathVariable(PathVariable::LaunchDate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("9223372036854775807", i64::MAX)]
    fn parses_signed_identifiers(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_movie_id(raw), Ok(MovieId::new(expected)));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("9223372036854775808")]
    #[case("")]
    fn rejects_non_numeric_identifiers(#[case] raw: &str) {
        assert_eq!(
            parse_movie_id(raw),
            Err(Error::MalformedPathVariable(PathVariable::Id))
        );
    }

    #[rstest]
    fn parses_iso_dates() {
        assert_eq!(
            parse_launch_date("2010-07-16"),
            Ok(NaiveDate::from_ymd_opt(2010, 7, 16).expect("valid date"))
        );
    }

    #[rstest]
    #[case("16-07-2010")]
    #[case("2010-13-01")]
    #[case("yesterday")]
    #[case("2010-7-6")]
    #[case("+2010-07-16")]
    fn rejects_other_date_formats(#[case] raw: &str) {
        assert_eq!(
            parse_launch_date(raw),
            Err(Error::MalformedPathVariable(PathVariable::LaunchDate))
        );
    }
}
