use test_utils::diagram_fixture;

use super::GenerationSession;
use super::SessionState;
use crate::domain::models::DiagramUpload;
use crate::domain::models::GenerationOutcome;
use crate::domain::models::GenerationRequest;
use crate::domain::models::TargetLanguage;
use crate::domain::services::validation::ValidationError;

fn request() -> GenerationRequest {
    let diagram = DiagramUpload::new(diagram_fixture(), "image/png", "diagram.png");
    return GenerationRequest::new(diagram, TargetLanguage::Python);
}

fn accepted(code: &str) -> GenerationOutcome {
    return GenerationOutcome::Accepted {
        code: code.to_string(),
        filename: "diagram.py".to_string(),
        explanation: "Two linked processes.".to_string(),
    };
}

fn accepted_session(code: &str) -> GenerationSession {
    let mut session = GenerationSession::default();
    let revision = session.submit(request()).unwrap();
    assert!(session.apply_outcome(revision, accepted(code)));
    return session;
}

#[test]
fn it_submits_a_validated_request() {
    let mut session = GenerationSession::default();
    let revision = session.submit(request());

    assert!(revision.is_some());
    assert_eq!(session.state(), SessionState::Submitting);
}

#[test]
fn it_ignores_a_second_submit_while_one_is_in_flight() {
    let mut session = GenerationSession::default();
    let first = session.submit(request());
    let second = session.submit(request());

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(session.revision(), first.unwrap());
}

#[test]
fn it_stores_code_and_explanation_on_acceptance() {
    let session = accepted_session("X");

    assert_eq!(session.state(), SessionState::Accepted);
    assert_eq!(session.code(), Some("X"));
    assert_eq!(session.output_filename(), Some("diagram.py"));
    assert_eq!(session.explanation(), Some("Two linked processes."));
}

#[test]
fn it_holds_no_code_when_the_diagram_is_rejected() {
    let mut session = GenerationSession::default();
    let revision = session.submit(request()).unwrap();
    session.apply_outcome(
        revision,
        GenerationOutcome::Rejected {
            explanation: "Y".to_string(),
        },
    );

    assert_eq!(session.state(), SessionState::Rejected);
    assert_eq!(session.code(), None);
    assert_eq!(session.explanation(), Some("Y"));
}

#[test]
fn it_fails_on_transport_errors_and_allows_resubmission() {
    let mut session = GenerationSession::default();
    let revision = session.submit(request()).unwrap();
    session.apply_failure(revision, "Failed to generate code");

    assert_eq!(session.state(), SessionState::Failed);
    assert_eq!(session.failure(), Some("Failed to generate code"));
    assert!(session.submit(request()).is_some());
}

#[test]
fn it_drops_generation_responses_from_an_abandoned_session() {
    let mut session = GenerationSession::default();
    let stale = session.submit(request()).unwrap();
    session.reset();

    assert!(!session.apply_outcome(stale, accepted("X")));
    assert!(!session.apply_failure(stale, "boom"));
    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.code(), None);
}

#[test]
fn it_rejects_blank_instructions_before_any_network_call() {
    let mut session = accepted_session("X");
    let res = session.begin_refine("   \n");

    assert_eq!(res, Err(ValidationError::EmptyInstructions));
    assert!(!session.is_refining());
    assert_eq!(session.refine_error(), Some("Please enter fix instructions"));
    assert_eq!(session.code(), Some("X"));
}

#[test]
fn it_requires_an_accepted_result_before_refining() {
    let mut session = GenerationSession::default();
    let res = session.begin_refine("rename the class").unwrap();
    assert!(res.is_none());
}

#[test]
fn it_refines_against_the_current_code_not_the_original() {
    let mut session = accepted_session("X");
    let payload = session.begin_refine("add docstrings").unwrap().unwrap();
    assert_eq!(payload.previous_code, "X");
    assert!(payload.generation_id.is_none());

    let revision = session.revision();
    session.apply_refine_outcome(revision, accepted("X2"));

    let payload = session.begin_refine("now add types").unwrap().unwrap();
    assert_eq!(payload.previous_code, "X2");
}

#[test]
fn it_trims_instructions_for_the_wire_but_keeps_the_typed_text() {
    let mut session = accepted_session("X");
    let payload = session.begin_refine("  add logging \n").unwrap().unwrap();

    assert_eq!(payload.instructions, "add logging");
    assert_eq!(session.instructions(), "  add logging \n");
}

#[test]
fn it_keeps_prior_state_when_a_refinement_is_rejected() {
    let mut session = accepted_session("X");
    session.begin_refine("make it worse").unwrap().unwrap();
    let revision = session.revision();

    let applied = session.apply_refine_outcome(
        revision,
        GenerationOutcome::Rejected {
            explanation: "Z".to_string(),
        },
    );

    assert!(applied);
    assert!(!session.is_refining());
    assert_eq!(session.code(), Some("X"));
    assert_eq!(session.explanation(), Some("Two linked processes."));
    assert_eq!(session.refine_error(), Some("Z"));
    assert_eq!(session.instructions(), "make it worse");
}

#[test]
fn it_replaces_code_and_explanation_together_on_refine_acceptance() {
    let mut session = accepted_session("X");
    session.begin_refine("tidy it up").unwrap().unwrap();
    let revision = session.revision();

    session.apply_refine_outcome(
        revision,
        GenerationOutcome::Accepted {
            code: "X2".to_string(),
            filename: "diagram.py".to_string(),
            explanation: "Tidied.".to_string(),
        },
    );

    assert_eq!(session.state(), SessionState::Accepted);
    assert_eq!(session.code(), Some("X2"));
    assert_eq!(session.explanation(), Some("Tidied."));
    assert_eq!(session.refine_error(), None);
    assert_eq!(session.instructions(), "");
}

#[test]
fn it_clears_an_earlier_refine_error_on_the_next_success() {
    let mut session = accepted_session("X");
    session.begin_refine("first try").unwrap().unwrap();
    let revision = session.revision();
    session.apply_refine_outcome(
        revision,
        GenerationOutcome::Rejected {
            explanation: "cannot do that".to_string(),
        },
    );
    assert!(session.refine_error().is_some());

    session.begin_refine("second try").unwrap().unwrap();
    session.apply_refine_outcome(revision, accepted("X2"));

    assert_eq!(session.refine_error(), None);
    assert_eq!(session.code(), Some("X2"));
}

#[test]
fn it_preserves_instructions_on_a_refine_transport_error() {
    let mut session = accepted_session("X");
    session.begin_refine("swap the loops").unwrap().unwrap();
    let revision = session.revision();

    session.apply_refine_failure(revision, "Failed to refine code");

    assert_eq!(session.code(), Some("X"));
    assert_eq!(session.refine_error(), Some("Failed to refine code"));
    assert_eq!(session.instructions(), "swap the loops");
}

#[test]
fn it_allows_only_one_refinement_in_flight() {
    let mut session = accepted_session("X");
    assert!(session.begin_refine("one").unwrap().is_some());
    assert!(session.begin_refine("two").unwrap().is_none());
}

#[test]
fn it_drops_refinement_responses_after_a_reset() {
    let mut session = accepted_session("X");
    session.begin_refine("too late").unwrap().unwrap();
    let stale = session.revision();
    session.reset();

    assert!(!session.apply_refine_outcome(stale, accepted("X2")));
    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.code(), None);
}

#[test]
fn it_resets_to_empty_from_any_terminal_state() {
    let mut session = accepted_session("X");
    session.reset();

    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.code(), None);
    assert_eq!(session.explanation(), None);
    assert_eq!(session.refine_error(), None);
    assert!(session.language().is_none());
}
