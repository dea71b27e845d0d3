#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

use std::fmt;

use crate::domain::models::DiagramUpload;
use crate::domain::models::MAX_DIAGRAM_BYTES;

const ACCEPTED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];
const ACCEPTED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// Reason-coded upload failures, surfaced inline next to the offending
/// control and never sent to the service.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    MissingFile,
    MultipleFiles(usize),
    UnsupportedFormat,
    Oversize(f64),
    EmptyInstructions,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::MissingFile => {
                return write!(f, "Please upload an OPM diagram");
            }
            ValidationError::MultipleFiles(count) => {
                return write!(
                    f,
                    "Please upload only one file at a time ({count} were offered)"
                );
            }
            ValidationError::UnsupportedFormat => {
                return write!(f, "Invalid file format. Supported formats: JPG, JPEG, PNG");
            }
            ValidationError::Oversize(megabytes) => {
                return write!(
                    f,
                    "File size exceeds 5 MB. Your file is {megabytes:.2} MB"
                );
            }
            ValidationError::EmptyInstructions => {
                return write!(f, "Please enter fix instructions");
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Exactly one file may be offered per submission. More than one is its own
/// failure, distinct from format and size violations.
pub fn validate_selection(count: usize) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::MissingFile);
    }
    if count > 1 {
        return Err(ValidationError::MultipleFiles(count));
    }

    return Ok(());
}

/// Checks a candidate upload before any network call: format first (declared
/// media type, falling back to the filename extension), then size. Returns
/// the first violated rule. Pure.
pub fn validate(upload: &DiagramUpload) -> Result<(), ValidationError> {
    let media_type = upload.media_type.to_lowercase();
    let format_ok = ACCEPTED_MEDIA_TYPES.contains(&media_type.as_str())
        || ACCEPTED_EXTENSIONS.contains(&upload.extension().as_str());

    if !format_ok {
        return Err(ValidationError::UnsupportedFormat);
    }

    if upload.bytes.len() > MAX_DIAGRAM_BYTES {
        return Err(ValidationError::Oversize(upload.size_megabytes()));
    }

    return Ok(());
}

/// Fix instructions must be non-empty after trimming. Returns the trimmed
/// text that goes on the wire.
pub fn validate_instructions(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInstructions);
    }

    return Ok(trimmed.to_string());
}
