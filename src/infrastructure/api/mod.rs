pub mod auth;
pub mod opm;
pub mod projects;

use anyhow::anyhow;
use serde_derive::Deserialize;

use crate::domain::models::AuthBox;
use crate::domain::models::CodegenBox;
use crate::domain::models::ProjectStoreBox;

/// Builds clients for the configured service. One server hosts all three
/// route groups, so each client is just a thin view over the same base URL.
pub struct ApiManager {}

impl ApiManager {
    pub fn codegen() -> CodegenBox {
        return Box::<opm::OpmServer>::default();
    }

    pub fn projects() -> ProjectStoreBox {
        return Box::<projects::ProjectsApi>::default();
    }

    pub fn auth() -> AuthBox {
        return Box::<auth::AuthApi>::default();
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Service errors carry a structured `{detail}` body. When one is present its
/// text is surfaced as-is; anything else collapses to the per-operation
/// fallback so no raw transport error reaches presentation.
pub(crate) async fn error_detail(res: reqwest::Response, fallback: &str) -> anyhow::Error {
    let status = res.status().as_u16();

    match res.json::<ErrorBody>().await {
        Ok(body) => {
            tracing::error!(status, detail = body.detail.as_str(), "service error");
            return anyhow!(body.detail);
        }
        Err(_) => {
            tracing::error!(status, "service error without a structured body");
            return anyhow!(fallback.to_string());
        }
    }
}

pub(crate) fn transport_error(err: reqwest::Error, fallback: &str) -> anyhow::Error {
    tracing::error!(error = ?err, "transport failure");
    return anyhow!(fallback.to_string());
}
