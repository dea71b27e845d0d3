#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::validation::validate_instructions;
use super::validation::ValidationError;
use crate::domain::models::GenerationOutcome;
use crate::domain::models::GenerationRequest;
use crate::domain::models::RefinementPayload;
use crate::domain::models::TargetLanguage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Submitting,
    Accepted,
    Rejected,
    Failed,
}

/// One diagram-to-code attempt and everything layered on top of it: the
/// originating request, the current best-known code and rationale, and the
/// refinement loop. Driven by discrete transitions so it can be exercised
/// without a UI harness.
///
/// Responses are tagged with a revision number. Any response that does not
/// match the current revision belongs to a session the user has already
/// abandoned and is dropped without mutating state.
pub struct GenerationSession {
    state: SessionState,
    revision: u64,
    request: Option<GenerationRequest>,
    code: Option<String>,
    output_filename: Option<String>,
    explanation: Option<String>,
    failure: Option<String>,
    refining: bool,
    refine_error: Option<String>,
    instructions: String,
}

impl Default for GenerationSession {
    fn default() -> GenerationSession {
        return GenerationSession {
            state: SessionState::Empty,
            revision: 0,
            request: None,
            code: None,
            output_filename: None,
            explanation: None,
            failure: None,
            refining: false,
            refine_error: None,
            instructions: "".to_string(),
        };
    }
}

impl GenerationSession {
    /// Accepts an already validated request and moves to Submitting. Only one
    /// generation may be in flight: while Submitting, further submits are
    /// no-ops. Returns the revision the eventual response must carry.
    pub fn submit(&mut self, request: GenerationRequest) -> Option<u64> {
        if self.state == SessionState::Submitting || self.refining {
            return None;
        }

        self.reset();
        self.request = Some(request);
        self.state = SessionState::Submitting;

        return Some(self.revision);
    }

    pub fn apply_outcome(&mut self, revision: u64, outcome: GenerationOutcome) -> bool {
        if self.state != SessionState::Submitting || revision != self.revision {
            return false;
        }

        match outcome {
            GenerationOutcome::Accepted {
                code,
                filename,
                explanation,
            } => {
                self.state = SessionState::Accepted;
                self.code = Some(code);
                self.output_filename = Some(filename);
                self.explanation = Some(explanation);
            }
            GenerationOutcome::Rejected { explanation } => {
                self.state = SessionState::Rejected;
                self.explanation = Some(explanation);
            }
        }

        return true;
    }

    pub fn apply_failure(&mut self, revision: u64, message: &str) -> bool {
        if self.state != SessionState::Submitting || revision != self.revision {
            return false;
        }

        self.state = SessionState::Failed;
        self.failure = Some(message.to_string());

        return true;
    }

    /// Starts a refinement pass over the accepted code. Instructions are
    /// checked locally first; a violation is stored as the refinement error
    /// and nothing reaches the network. Returns `None` when no refinement may
    /// start (no accepted result, or one already in flight).
    pub fn begin_refine(
        &mut self,
        instructions: &str,
    ) -> Result<Option<RefinementPayload>, ValidationError> {
        if self.state != SessionState::Accepted || self.refining {
            return Ok(None);
        }

        let trimmed = match validate_instructions(instructions) {
            Ok(trimmed) => trimmed,
            Err(err) => {
                self.refine_error = Some(err.to_string());
                return Err(err);
            }
        };

        let (diagram, language) = match &self.request {
            Some(request) => (request.diagram.clone(), request.language),
            None => return Ok(None),
        };
        let previous_code = match &self.code {
            Some(code) => code.to_string(),
            None => return Ok(None),
        };

        self.refining = true;
        self.refine_error = None;
        self.instructions = instructions.to_string();

        return Ok(Some(RefinementPayload {
            diagram,
            language,
            previous_code,
            instructions: trimmed,
            generation_id: None,
        }));
    }

    /// On acceptance the code and explanation are replaced together and the
    /// typed instructions are cleared. On rejection nothing is replaced: the
    /// rejection text lands in the dedicated refinement error slot and the
    /// instructions stay put so the user can amend and resend.
    pub fn apply_refine_outcome(&mut self, revision: u64, outcome: GenerationOutcome) -> bool {
        if !self.refining || revision != self.revision {
            return false;
        }

        self.refining = false;
        match outcome {
            GenerationOutcome::Accepted {
                code,
                filename,
                explanation,
            } => {
                self.code = Some(code);
                self.output_filename = Some(filename);
                self.explanation = Some(explanation);
                self.refine_error = None;
                self.instructions = "".to_string();
            }
            GenerationOutcome::Rejected { explanation } => {
                self.refine_error = Some(explanation);
            }
        }

        return true;
    }

    pub fn apply_refine_failure(&mut self, revision: u64, message: &str) -> bool {
        if !self.refining || revision != self.revision {
            return false;
        }

        self.refining = false;
        self.refine_error = Some(message.to_string());

        return true;
    }

    /// Back to Empty, dropping all result state. Bumps the revision so
    /// anything still in flight lands in the void.
    pub fn reset(&mut self) {
        self.revision += 1;
        self.state = SessionState::Empty;
        self.request = None;
        self.code = None;
        self.output_filename = None;
        self.explanation = None;
        self.failure = None;
        self.refining = false;
        self.refine_error = None;
        self.instructions = "".to_string();
    }

    pub fn state(&self) -> SessionState {
        return self.state;
    }

    pub fn revision(&self) -> u64 {
        return self.revision;
    }

    pub fn code(&self) -> Option<&str> {
        return self.code.as_deref();
    }

    pub fn output_filename(&self) -> Option<&str> {
        return self.output_filename.as_deref();
    }

    pub fn explanation(&self) -> Option<&str> {
        return self.explanation.as_deref();
    }

    pub fn failure(&self) -> Option<&str> {
        return self.failure.as_deref();
    }

    pub fn refine_error(&self) -> Option<&str> {
        return self.refine_error.as_deref();
    }

    pub fn instructions(&self) -> &str {
        return self.instructions.as_str();
    }

    pub fn is_refining(&self) -> bool {
        return self.refining;
    }

    pub fn is_waiting(&self) -> bool {
        return self.state == SessionState::Submitting || self.refining;
    }

    pub fn language(&self) -> Option<TargetLanguage> {
        return self.request.as_ref().map(|request| return request.language);
    }
}
