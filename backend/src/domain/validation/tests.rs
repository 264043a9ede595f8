//! Tests for movie field validation.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid fixture date")
}

fn inception() -> MovieDraft {
    MovieDraft {
        title: Some("Inception".to_owned()),
        launch_date: NaiveDate::from_ymd_opt(2010, 7, 16),
        rating: Some(Decimal::new(88, 1)),
        revenue: Some(825_500_000),
    }
}

#[fixture]
fn valid_draft() -> MovieDraft {
    inception()
}

#[rstest]
fn valid_draft_has_no_errors(valid_draft: MovieDraft, today: NaiveDate) {
    assert!(validate_one(&valid_draft, today).is_empty());
}

#[rstest]
fn empty_draft_reports_every_field(today: NaiveDate) {
    let errors = validate_one(&MovieDraft::default(), today);

    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
    assert_eq!(errors.get(Field::LaunchDate), Some(LAUNCH_DATE_REQUIRED));
    assert_eq!(errors.get(Field::Rating), Some(RATING_REQUIRED));
    assert_eq!(errors.get(Field::Revenue), Some(REVENUE_REQUIRED));
}

#[rstest]
#[case::empty_title(
    MovieDraft { title: Some(String::new()), ..inception() },
    Field::Title,
    TITLE_REQUIRED
)]
#[case::missing_title(
    MovieDraft { title: None, ..inception() },
    Field::Title,
    TITLE_REQUIRED
)]
#[case::future_launch(
    MovieDraft { launch_date: NaiveDate::from_ymd_opt(2024, 6, 16), ..inception() },
    Field::LaunchDate,
    LAUNCH_DATE_IN_FUTURE
)]
#[case::negative_rating(
    MovieDraft { rating: Some(Decimal::new(-1, 1)), ..inception() },
    Field::Rating,
    RATING_OUT_OF_RANGE
)]
#[case::rating_above_ten(
    MovieDraft { rating: Some(Decimal::new(101, 1)), ..inception() },
    Field::Rating,
    RATING_OUT_OF_RANGE
)]
#[case::missing_revenue(
    MovieDraft { revenue: None, ..inception() },
    Field::Revenue,
    REVENUE_REQUIRED
)]
fn single_invalid_field_reports_only_that_field(
    #[case] draft: MovieDraft,
    #[case] field: Field,
    #[case] message: &str,
    today: NaiveDate,
) {
    let errors = validate_one(&draft, today);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(field), Some(message));
}

#[rstest]
fn launch_date_equal_to_today_is_accepted(valid_draft: MovieDraft, today: NaiveDate) {
    let draft = MovieDraft {
        launch_date: Some(today),
        ..valid_draft
    };
    assert!(validate_one(&draft, today).is_empty());
}

#[rstest]
fn whitespace_title_is_not_empty(valid_draft: MovieDraft, today: NaiveDate) {
    let draft = MovieDraft {
        title: Some("   ".to_owned()),
        ..valid_draft
    };
    assert!(validate_one(&draft, today).is_empty());
}

#[rstest]
fn batch_validation_unions_fields_across_elements(valid_draft: MovieDraft, today: NaiveDate) {
    let drafts = [
        MovieDraft {
            title: None,
            ..valid_draft.clone()
        },
        valid_draft.clone(),
        MovieDraft {
            rating: Some(Decimal::new(-1, 1)),
            ..valid_draft.clone()
        },
        MovieDraft {
            title: Some(String::new()),
            ..valid_draft
        },
    ];

    let errors = validate_many(&drafts, today);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
    assert_eq!(errors.get(Field::Rating), Some(RATING_OUT_OF_RANGE));
}

#[rstest]
fn batch_validation_keeps_first_message_per_field(valid_draft: MovieDraft, today: NaiveDate) {
    let drafts = [
        MovieDraft {
            rating: Some(Decimal::new(11, 0)),
            ..valid_draft.clone()
        },
        MovieDraft {
            rating: None,
            ..valid_draft
        },
    ];

    let errors = validate_many(&drafts, today);

    assert_eq!(errors.get(Field::Rating), Some(RATING_OUT_OF_RANGE));
}

#[rstest]
fn batch_of_valid_drafts_is_clean(valid_draft: MovieDraft, today: NaiveDate) {
    let drafts = vec![valid_draft.clone(), valid_draft];
    assert!(validate_many(&drafts, today).is_empty());
}

#[rstest]
fn empty_batch_is_clean(today: NaiveDate) {
    assert!(validate_many(&Vec::<MovieDraft>::new(), today).is_empty());
}

#[rstest]
#[case(NaiveDate::from_ymd_opt(2999, 1, 1), false)]
#[case(NaiveDate::from_ymd_opt(2024, 6, 15), true)]
#[case(NaiveDate::from_ymd_opt(1895, 12, 28), true)]
fn path_date_uses_the_same_predicate(
    #[case] date: Option<NaiveDate>,
    #[case] accepted: bool,
    today: NaiveDate,
) {
    let date = date.expect("valid case date");
    let result = validate_launch_date_path(date, today);

    assert_eq!(result.is_ok(), accepted);
    if let Err(errors) = result {
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::LaunchDate),
            Some(LAUNCH_DATE_PATH_IN_FUTURE)
        );
    }
}

#[rstest]
fn field_errors_serialise_with_wire_names() {
    let errors = FieldErrors::single(Field::LaunchDate, LAUNCH_DATE_IN_FUTURE)
        .with(Field::Revenue, REVENUE_REQUIRED);

    let value = serde_json::to_value(&errors).expect("serialise field errors");

    assert_eq!(
        value,
        serde_json::json!({
            "launchDate": LAUNCH_DATE_IN_FUTURE,
            "revenue": REVENUE_REQUIRED,
        })
    );
}
