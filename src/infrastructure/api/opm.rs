#[cfg(test)]
#[path = "opm_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::error_detail;
use super::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CodegenBackend;
use crate::domain::models::DiagramUpload;
use crate::domain::models::GenerationOutcome;
use crate::domain::models::GenerationRequest;
use crate::domain::models::RefinementPayload;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

fn diagram_part(diagram: &DiagramUpload) -> Result<multipart::Part> {
    let mut media_type = diagram.media_type.to_string();
    if media_type.is_empty() {
        media_type = "application/octet-stream".to_string();
    }

    let part = multipart::Part::bytes(diagram.bytes.clone())
        .file_name(diagram.filename.to_string())
        .mime_str(&media_type)?;

    return Ok(part);
}

/// The wire discriminator is `status`: `"valid"` promises code and filename,
/// anything else is a first-class rejection carrying only the rationale. A
/// `"valid"` response without code is malformed and treated as a transport
/// failure, never as a result.
fn into_outcome(res: GenerateResponse) -> Result<GenerationOutcome> {
    if res.status == "valid" {
        match (res.code, res.filename) {
            (Some(code), Some(filename)) => {
                return Ok(GenerationOutcome::Accepted {
                    code,
                    filename,
                    explanation: res.explanation.unwrap_or_default(),
                });
            }
            _ => {
                bail!("The service accepted the diagram but returned no code");
            }
        }
    }

    return Ok(GenerationOutcome::Rejected {
        explanation: res
            .explanation
            .unwrap_or_else(|| return "Diagram is invalid.".to_string()),
    });
}

pub struct OpmServer {
    url: String,
}

impl Default for OpmServer {
    fn default() -> OpmServer {
        return OpmServer {
            url: Config::get(ConfigKey::ServerUrl),
        };
    }
}

#[async_trait]
impl CodegenBackend for OpmServer {
    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        let form = multipart::Form::new()
            .part("file", diagram_part(&request.diagram)?)
            .text("target_language", request.language.to_string());

        let res = reqwest::Client::new()
            .post(format!("{url}/opm/generate-code", url = self.url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to generate code"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to generate code").await);
        }

        let body = res
            .json::<GenerateResponse>()
            .await
            .map_err(|err| return transport_error(err, "Failed to generate code"))?;
        tracing::debug!(status = body.status.as_str(), "generate response");

        return into_outcome(body);
    }

    #[allow(clippy::implicit_return)]
    async fn refine(&self, payload: &RefinementPayload) -> Result<GenerationOutcome> {
        let mut form = multipart::Form::new()
            .part("file", diagram_part(&payload.diagram)?)
            .text("target_language", payload.language.to_string())
            .text("previous_code", payload.previous_code.to_string())
            .text("fix_instructions", payload.instructions.to_string());

        if let Some(generation_id) = &payload.generation_id {
            form = form.text("generation_id", generation_id.to_string());
        }

        let res = reqwest::Client::new()
            .put(format!("{url}/opm/refine-code", url = self.url))
            .multipart(form)
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to refine code"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to refine code").await);
        }

        let body = res
            .json::<GenerateResponse>()
            .await
            .map_err(|err| return transport_error(err, "Failed to refine code"))?;
        tracing::debug!(status = body.status.as_str(), "refine response");

        return into_outcome(body);
    }
}
