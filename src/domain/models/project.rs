use chrono::NaiveDateTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::TargetLanguage;

/// A persisted record of a completed generation, as the service returns it
/// from the list and detail endpoints (binary diagram excluded).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub generation_id: String,
    #[serde(default)]
    pub user_email: String,
    pub pdf_filename: String,
    pub output_filename: String,
    pub target_language: TargetLanguage,
    pub ai_explanation: String,
    pub ai_generated_code: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Project {
    /// `created_at` formatted for the projects list, falling back to the raw
    /// value when the service hands back something unparsable.
    pub fn created_at_display(&self) -> String {
        if let Ok(timestamp) =
            NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
        {
            return timestamp.format("%b %e, %Y %H:%M").to_string();
        }

        return self.created_at.to_string();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub generation_id: String,
    pub target_language: TargetLanguage,
    pub code_lines: u64,
    pub code_characters: u64,
    pub code_size_kb: f64,
    pub pdf_size_kb: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub has_been_refined: bool,
}
