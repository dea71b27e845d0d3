use test_utils::diagram_fixture;

use super::validate;
use super::validate_instructions;
use super::validate_selection;
use super::ValidationError;
use crate::domain::models::DiagramUpload;
use crate::domain::models::MAX_DIAGRAM_BYTES;

fn upload(media_type: &str, filename: &str) -> DiagramUpload {
    return DiagramUpload::new(diagram_fixture(), media_type, filename);
}

#[test]
fn it_accepts_declared_image_types() {
    assert!(validate(&upload("image/png", "diagram.png")).is_ok());
    assert!(validate(&upload("image/jpeg", "diagram.jpeg")).is_ok());
    assert!(validate(&upload("image/jpg", "diagram.jpg")).is_ok());
}

#[test]
fn it_falls_back_to_the_extension_when_the_declared_type_is_nonstandard() {
    assert!(validate(&upload("application/octet-stream", "diagram.png")).is_ok());
    assert!(validate(&upload("", "DIAGRAM.JPEG")).is_ok());
}

#[test]
fn it_rejects_when_both_type_and_extension_are_wrong() {
    let res = validate(&upload("application/pdf", "diagram.pdf"));
    assert_eq!(res, Err(ValidationError::UnsupportedFormat));

    let res = validate(&upload("text/plain", "diagram"));
    assert_eq!(res, Err(ValidationError::UnsupportedFormat));
}

#[test]
fn it_accepts_a_bad_extension_when_the_declared_type_matches() {
    assert!(validate(&upload("image/png", "diagram.bmp")).is_ok());
}

#[test]
fn it_rejects_oversize_files() {
    let mut oversize = upload("image/png", "diagram.png");
    oversize.bytes = vec![0u8; MAX_DIAGRAM_BYTES + 1];

    match validate(&oversize) {
        Err(ValidationError::Oversize(megabytes)) => {
            assert!(megabytes > 5.0);
        }
        other => panic!("expected an oversize violation, got {other:?}"),
    }
}

#[test]
fn it_accepts_a_file_at_exactly_the_limit() {
    let mut at_limit = upload("image/png", "diagram.png");
    at_limit.bytes = vec![0u8; MAX_DIAGRAM_BYTES];
    assert!(validate(&at_limit).is_ok());
}

#[test]
fn it_checks_the_format_before_the_size() {
    let mut both_wrong = upload("application/pdf", "diagram.pdf");
    both_wrong.bytes = vec![0u8; MAX_DIAGRAM_BYTES + 1];
    assert_eq!(validate(&both_wrong), Err(ValidationError::UnsupportedFormat));
}

#[test]
fn it_requires_exactly_one_file() {
    assert_eq!(validate_selection(0), Err(ValidationError::MissingFile));
    assert!(validate_selection(1).is_ok());
    assert_eq!(validate_selection(3), Err(ValidationError::MultipleFiles(3)));
}

#[test]
fn it_rejects_blank_fix_instructions() {
    assert_eq!(
        validate_instructions(""),
        Err(ValidationError::EmptyInstructions)
    );
    assert_eq!(
        validate_instructions("  \n\t "),
        Err(ValidationError::EmptyInstructions)
    );
}

#[test]
fn it_trims_fix_instructions() {
    assert_eq!(
        validate_instructions("  add type hints \n"),
        Ok("add type hints".to_string())
    );
}

#[test]
fn it_renders_the_oversize_message_with_the_actual_size() {
    let message = ValidationError::Oversize(6.5).to_string();
    insta::assert_snapshot!(message, @"File size exceeds 5 MB. Your file is 6.50 MB");
}
