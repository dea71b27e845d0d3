use tui_textarea::Input;

use super::GenerationOutcome;
use super::Project;

/// Everything the UI loop can be woken up by: keyboard input, the render
/// tick, and results coming back from the engine. Generation and refinement
/// events carry the session revision they answer so the UI can drop
/// responses that outlived their session.
pub enum Event {
    GenerationCompleted(u64, GenerationOutcome),
    GenerationErrored(u64, String),
    RefinementCompleted(u64, GenerationOutcome),
    RefinementErrored(u64, String),
    ProgressStage(String),
    ProjectsLoaded(Vec<Project>),
    ProjectsErrored(String),
    ProjectDeleted(String),
    ProjectActionErrored(String),
    StatusMessage(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UITick(),
    UIScrollDown(),
    UIScrollUp(),
}
