use super::GenerationRequest;
use super::RefinementPayload;

/// Work the UI asks the engine to do. Network calls all live behind these so
/// the render loop never blocks on the service.
pub enum Action {
    GenerationRequest(u64, GenerationRequest),
    RefinementRequest(u64, RefinementPayload),
    ProjectsList(),
    ProjectDelete(String),
    ProjectDownloadCode(String, String),
    ProjectDownloadDiagram(String, String),
    ExportCode(String, String),
    CopyCode(String),
}
