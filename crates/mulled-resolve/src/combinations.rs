//! Multi-package combination lookup
//!
//! Multi-package containers are registered as files in a hosted listing,
//! named after their package hash and containing the comma-separated
//! `name=version=build` entries of the member packages.

use mulled_core::TargetSet;
use std::time::Duration;

pub struct CombinationsClient {
    client: reqwest::Client,
    api_url: String,
    repo: String,
}

impl CombinationsClient {
    pub fn new(api_url: &str, repo: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (combinations lookup)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        })
    }

    /// Find the combination registered under a package hash and parse its
    /// member packages. `Ok(None)` means the hash is not registered.
    pub async fn lookup(&self, package_hash: &str) -> anyhow::Result<Option<TargetSet>> {
        let url = format!("{}/repos/{}/contents/combinations/", self.api_url, self.repo);
        let listing: Vec<serde_json::Value> = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        for entry in listing {
            let name = entry.get("name").and_then(|n| n.as_str()).unwrap_or("");
            if !name.starts_with(package_hash) {
                continue;
            }
            let download_url = entry
                .get("download_url")
                .and_then(|u| u.as_str())
                .ok_or_else(|| anyhow::anyhow!("combination {} has no download URL", name))?;
            let content = self
                .client
                .get(download_url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            return Ok(Some(parse_combination(&content)?));
        }
        Ok(None)
    }
}

/// Parse a combination file: comma-separated `name[=version[=build]]`
/// entries, tolerating surrounding whitespace and a trailing newline.
pub fn parse_combination(content: &str) -> anyhow::Result<TargetSet> {
    let specs: Vec<&str> = content
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    Ok(TargetSet::from_specs(specs)?)
}
