//! Recipe stores
//!
//! A recipe store serves files out of a recipes repository, either a local
//! checkout or the hosted repository on GitHub. Paths are always relative to
//! the repository root (`recipes/<name>/<version>/meta.yaml`).

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RecipeError, Result};

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Read a file at a path relative to the repository root.
    async fn read_file(&self, rel_path: &str) -> Result<String>;

    /// List the relative paths matching `recipes/<package>/*/<filename>`,
    /// one per sibling version directory that carries the file.
    async fn list_version_files(&self, package: &str, filename: &str) -> Result<Vec<String>>;
}

/// Store backed by a local checkout of the recipes repository.
pub struct LocalRecipeStore {
    root: PathBuf,
}

impl LocalRecipeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RecipeStore for LocalRecipeStore {
    async fn read_file(&self, rel_path: &str) -> Result<String> {
        let path = self.root.join(rel_path);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(RecipeError::NotFound(rel_path.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_version_files(&self, package: &str, filename: &str) -> Result<Vec<String>> {
        let pattern = format!(
            "{}/recipes/{}/*/{}",
            self.root.display(),
            package,
            filename
        );
        let mut files = Vec::new();
        for entry in
            glob::glob(&pattern).map_err(|e| anyhow::anyhow!("bad glob pattern: {}", e))?
        {
            let path = entry.map_err(|e| anyhow::anyhow!("glob entry failed: {}", e))?;
            if let Ok(rel) = path.strip_prefix(&self.root) {
                files.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Store backed by the hosted recipes repository on GitHub: raw file access
/// for reads, the contents API for version-directory listings.
pub struct GithubRecipeStore {
    client: reqwest::Client,
    api_url: String,
    raw_url: String,
    repo: String,
}

impl GithubRecipeStore {
    pub fn new(api_url: &str, raw_url: &str, repo: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (recipe store)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            raw_url: raw_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        })
    }

    fn raw_file_url(&self, rel_path: &str) -> String {
        format!("{}/{}/master/{}", self.raw_url, self.repo, rel_path)
    }
}

#[async_trait]
impl RecipeStore for GithubRecipeStore {
    async fn read_file(&self, rel_path: &str) -> Result<String> {
        let response = self.client.get(self.raw_file_url(rel_path)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RecipeError::NotFound(rel_path.to_string()));
        }
        Ok(response.error_for_status()?.text().await?)
    }

    async fn list_version_files(&self, package: &str, filename: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{}/contents/recipes/{}",
            self.api_url, self.repo, package
        );
        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RecipeError::NotFound(format!("recipes/{}", package)));
        }
        let listing: Vec<serde_json::Value> = response.error_for_status()?.json().await?;

        let mut files = Vec::new();
        for entry in listing {
            if entry.get("type").and_then(|t| t.as_str()) != Some("dir") {
                continue;
            }
            let Some(path) = entry.get("path").and_then(|p| p.as_str()) else {
                continue;
            };
            let candidate = format!("{}/{}", path, filename);
            // the contents API lists directories only; probe for the file
            let probe = self.client.get(self.raw_file_url(&candidate)).send().await;
            match probe {
                Ok(response) if response.status().is_success() => files.push(candidate),
                Ok(_) => {}
                Err(err) => tracing::debug!("probe for {} failed: {}", candidate, err),
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_recipe(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_local_read_file() {
        let dir = tempfile::tempdir().unwrap();
        write_recipe(
            dir.path(),
            "recipes/samtools/1.3.1/meta.yaml",
            "test:\n  commands:\n    - samtools --help\n",
        );

        let store = LocalRecipeStore::new(dir.path());
        let content = store
            .read_file("recipes/samtools/1.3.1/meta.yaml")
            .await
            .unwrap();
        assert!(content.contains("samtools --help"));
    }

    #[tokio::test]
    async fn test_local_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalRecipeStore::new(dir.path());
        let err = store.read_file("recipes/absent/meta.yaml").await.unwrap_err();
        assert!(matches!(err, RecipeError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_local_version_listing() {
        let dir = tempfile::tempdir().unwrap();
        write_recipe(dir.path(), "recipes/samtools/1.0/meta.yaml", "a: 1\n");
        write_recipe(dir.path(), "recipes/samtools/1.1/meta.yaml", "a: 1\n");
        write_recipe(dir.path(), "recipes/samtools/1.1/run_test.sh", "x\n");
        write_recipe(dir.path(), "recipes/samtools/meta.yaml", "a: 1\n");

        let store = LocalRecipeStore::new(dir.path());
        let files = store.list_version_files("samtools", "meta.yaml").await.unwrap();
        assert_eq!(
            files,
            [
                "recipes/samtools/1.0/meta.yaml",
                "recipes/samtools/1.1/meta.yaml"
            ]
        );

        let scripts = store
            .list_version_files("samtools", "run_test.sh")
            .await
            .unwrap();
        assert_eq!(scripts, ["recipes/samtools/1.1/run_test.sh"]);
    }
}
