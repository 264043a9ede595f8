//! Tests for the domain error taxonomy.

use super::*;
use rstest::rstest;

#[rstest]
fn malformed_fields_are_deduplicated() {
    let error = Error::malformed_fields([
        FieldFormat::Rating,
        FieldFormat::LaunchDate,
        FieldFormat::Rating,
    ]);

    let Error::MalformedFields(formats) = error else {
        panic!("expected malformed fields");
    };
    assert_eq!(
        formats.into_iter().collect::<Vec<_>>(),
        vec![FieldFormat::LaunchDate, FieldFormat::Rating]
    );
}

#[rstest]
#[case(FieldFormat::LaunchDate, Field::LaunchDate)]
#[case(FieldFormat::Rating, Field::Rating)]
#[case(FieldFormat::Revenue, Field::Revenue)]
fn field_format_maps_to_its_field(#[case] format: FieldFormat, #[case] field: Field) {
    assert_eq!(format.field(), field);
    assert!(!format.message().is_empty());
}

#[rstest]
fn not_found_display_names_the_identifier() {
    let error = Error::MovieNotFound(MovieId::new(999_999));
    assert_eq!(
        error.to_string(),
        "Movie with ID 999999 was not found in the database"
    );
}

#[rstest]
fn validation_display_lists_fields() {
    let errors = FieldErrors::single(Field::Title, "Title cannot be empty or null")
        .with(Field::Revenue, "Revenue cannot be null");
    let error = Error::validation(ValidationScope::Movie, errors);

    assert_eq!(
        error.to_string(),
        "validation failed for Movie: title: Title cannot be empty or null; \
         revenue: Revenue cannot be null"
    );
}

#[rstest]
fn method_not_allowed_collects_allowed_methods() {
    let error = Error::method_not_allowed("PATCH", ["GET", "PUT"]);
    assert_eq!(
        error,
        Error::MethodNotAllowed {
            method: "PATCH".to_owned(),
            allowed: vec!["GET".to_owned(), "PUT".to_owned()],
        }
    );
}
