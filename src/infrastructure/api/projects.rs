#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use super::error_detail;
use super::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Project;
use crate::domain::models::ProjectStats;
use crate::domain::models::ProjectStore;

pub struct ProjectsApi {
    url: String,
}

impl Default for ProjectsApi {
    fn default() -> ProjectsApi {
        return ProjectsApi {
            url: Config::get(ConfigKey::ServerUrl),
        };
    }
}

#[async_trait]
impl ProjectStore for ProjectsApi {
    #[allow(clippy::implicit_return)]
    async fn list(&self, user_email: &str) -> Result<Vec<Project>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/projects", url = self.url))
            .query(&[("user_email", user_email)])
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch projects"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to fetch projects").await);
        }

        let projects = res
            .json::<Vec<Project>>()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch projects"))?;
        tracing::debug!(count = projects.len(), "fetched projects");

        return Ok(projects);
    }

    #[allow(clippy::implicit_return)]
    async fn get(&self, generation_id: &str) -> Result<Project> {
        let res = reqwest::Client::new()
            .get(format!("{url}/projects/{generation_id}", url = self.url))
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch project"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to fetch project").await);
        }

        return res
            .json::<Project>()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch project"));
    }

    #[allow(clippy::implicit_return)]
    async fn fetch_diagram(&self, generation_id: &str) -> Result<Vec<u8>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/projects/{generation_id}/pdf", url = self.url))
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch pdf"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to fetch pdf").await);
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch pdf"))?;

        return Ok(bytes.to_vec());
    }

    #[allow(clippy::implicit_return)]
    async fn fetch_code(&self, generation_id: &str) -> Result<Vec<u8>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/projects/{generation_id}/code", url = self.url))
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch code"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to fetch code").await);
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch code"))?;

        return Ok(bytes.to_vec());
    }

    #[allow(clippy::implicit_return)]
    async fn delete(&self, generation_id: &str, user_email: &str) -> Result<()> {
        let res = reqwest::Client::new()
            .delete(format!("{url}/projects/{generation_id}", url = self.url))
            .query(&[("user_email", user_email)])
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to delete project"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to delete project").await);
        }

        tracing::debug!(generation_id, "deleted project");

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stats(&self, generation_id: &str) -> Result<ProjectStats> {
        let res = reqwest::Client::new()
            .get(format!(
                "{url}/projects/{generation_id}/stats",
                url = self.url
            ))
            .send()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch project stats"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Failed to fetch project stats").await);
        }

        return res
            .json::<ProjectStats>()
            .await
            .map_err(|err| return transport_error(err, "Failed to fetch project stats"));
    }
}
