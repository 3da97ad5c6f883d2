//! Log-file resource provider
//!
//! Exposes application log files as read-only MCP resources. Simple file
//! I/O with URI-to-path resolution; URIs that match no configured mapping
//! fall back to plain `file://` path extraction.

use async_trait::async_trait;

use mt_config::LogFileConfig;
use mt_mcp::{McpResource, ResourceProvider};
use mt_types::{AppError, AppResult};

/// Read-only catalog of configured log files
pub struct LogResourceProvider {
    files: Vec<LogFileConfig>,
}

impl LogResourceProvider {
    pub fn new(files: Vec<LogFileConfig>) -> Self {
        Self { files }
    }

    fn resolve(&self, uri: &str) -> Option<std::path::PathBuf> {
        if let Some(file) = self.files.iter().find(|f| f.uri == uri) {
            return Some(file.path.clone());
        }

        // Fallback: any file:// URI maps to its path directly
        uri.strip_prefix("file://").map(std::path::PathBuf::from)
    }
}

#[async_trait]
impl ResourceProvider for LogResourceProvider {
    async fn list(&self) -> AppResult<Vec<McpResource>> {
        let resources = self
            .files
            .iter()
            .filter(|f| f.always_listed || f.path.exists())
            .map(|f| McpResource {
                name: f.name.clone(),
                uri: f.uri.clone(),
                description: f.description.clone(),
                mime_type: Some("text/plain".to_string()),
            })
            .collect();

        Ok(resources)
    }

    async fn read(&self, uri: &str) -> AppResult<String> {
        let path = self
            .resolve(uri)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Resource not found: {}", uri)))?;

        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AppError::ResourceNotFound(format!("Cannot read resource {}: {}", uri, e))
        })?;

        if contents.trim().is_empty() {
            return Ok(format!("Log file at {} is empty.", path.display()));
        }

        Ok(contents)
    }
}
