#[cfg(test)]
#[path = "exporter_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Writes code and diagram artifacts to the download directory. One contract
/// for both sources: a freshly generated code string and a binary blob pulled
/// from a persisted project go through the same call.
pub struct Exporter {
    pub download_dir: path::PathBuf,
}

impl Default for Exporter {
    fn default() -> Exporter {
        let configured = Config::get(ConfigKey::DownloadDir);
        let download_dir = if configured.is_empty() {
            dirs::download_dir().unwrap_or_else(|| return path::PathBuf::from("."))
        } else {
            path::PathBuf::from(configured)
        };

        return Exporter::new(download_dir);
    }
}

impl Exporter {
    pub fn new(download_dir: path::PathBuf) -> Exporter {
        return Exporter { download_dir };
    }

    /// Saves one artifact under its service-provided filename and returns the
    /// full path. The content is written out and dropped; nothing is retained.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<path::PathBuf> {
        if !self.download_dir.exists() {
            fs::create_dir_all(&self.download_dir).await?;
        }

        let target = self.download_dir.join(filename);
        let mut file = fs::File::create(&target).await?;
        file.write_all(bytes).await?;

        tracing::debug!(path = ?target, bytes = bytes.len(), "saved artifact");

        return Ok(target);
    }
}
