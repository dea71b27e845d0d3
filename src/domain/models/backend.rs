use anyhow::Result;
use async_trait::async_trait;

use super::GenerationOutcome;
use super::GenerationRequest;
use super::Project;
use super::ProjectStats;
use super::RefinementPayload;
use super::UserIdentity;

/// The remote diagram-to-code capability. Both calls are long-latency (up to
/// a few minutes) and settle with a ternary outcome: an accepted result, a
/// rejection with rationale, or a transport error.
#[async_trait]
pub trait CodegenBackend {
    /// Submits a diagram and target language for a first generation.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome>;

    /// Submits the diagram, the current code, and free-text fix instructions
    /// for a follow-up pass.
    async fn refine(&self, payload: &RefinementPayload) -> Result<GenerationOutcome>;
}

pub type CodegenBox = Box<dyn CodegenBackend + Send + Sync>;

/// Read/list/delete access to persisted past generations. Independent of any
/// in-flight generation session.
#[async_trait]
pub trait ProjectStore {
    /// All projects owned by the given identity. An empty list is a valid,
    /// non-error result.
    async fn list(&self, user_email: &str) -> Result<Vec<Project>>;

    async fn get(&self, generation_id: &str) -> Result<Project>;

    /// The stored diagram image, for export.
    async fn fetch_diagram(&self, generation_id: &str) -> Result<Vec<u8>>;

    /// The stored generated code, for export.
    async fn fetch_code(&self, generation_id: &str) -> Result<Vec<u8>>;

    /// Deletes one project, authorized by owner email match.
    async fn delete(&self, generation_id: &str, user_email: &str) -> Result<()>;

    async fn stats(&self, generation_id: &str) -> Result<ProjectStats>;
}

pub type ProjectStoreBox = Box<dyn ProjectStore + Send + Sync>;

#[async_trait]
pub trait AuthBackend {
    /// Creates an account. Returns the service's confirmation message.
    async fn signup(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password: &str,
    ) -> Result<String>;

    /// Authenticates and returns the identity owning the session.
    async fn login(&self, email: &str, password: &str) -> Result<UserIdentity>;
}

pub type AuthBox = Box<dyn AuthBackend + Send + Sync>;
