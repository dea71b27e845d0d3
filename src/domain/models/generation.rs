use super::DiagramUpload;
use super::TargetLanguage;

/// Everything one generation attempt needs. Immutable once submitted: the
/// refinement loop re-sends the same diagram and language on every pass.
#[derive(Clone)]
pub struct GenerationRequest {
    pub diagram: DiagramUpload,
    pub language: TargetLanguage,
}

impl GenerationRequest {
    pub fn new(diagram: DiagramUpload, language: TargetLanguage) -> GenerationRequest {
        return GenerationRequest { diagram, language };
    }
}

/// What the service decided about a generation or refinement attempt. The
/// explanation is human-readable rationale on both branches; code exists only
/// on the accepted one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    Accepted {
        code: String,
        filename: String,
        explanation: String,
    },
    Rejected {
        explanation: String,
    },
}

/// A follow-up pass over already accepted code. `previous_code` is the
/// session's current code at send time, not the first generation's.
/// `generation_id` disambiguates which persisted project is being refined and
/// is omitted for a same-session refinement.
#[derive(Clone, Debug, PartialEq)]
pub struct RefinementPayload {
    pub diagram: DiagramUpload,
    pub language: TargetLanguage,
    pub previous_code: String,
    pub instructions: String,
    pub generation_id: Option<String>,
}
