//! Quay registry access
//!
//! Repository listing, tag expansion, name search and the pre-existence
//! check for package-hash named containers.

use mulled_core::MulledHash;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{RegistryError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A repository/tag pair returned by a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub package: String,
    pub version: String,
}

/// Outcome of a package-hash pre-existence check.
#[derive(Debug, Clone, Serialize)]
pub struct HashStatus {
    pub container_present: bool,
    /// Whether the version hash appears among the container's tags; only
    /// checked when the hash carries one.
    pub container_present_with_version: Option<bool>,
}

pub struct QuayRegistry {
    client: reqwest::Client,
    api_url: String,
    organization: String,
}

impl QuayRegistry {
    pub fn new(api_url: &str, organization: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (registry search)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            organization: organization.to_string(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// All public repositories of the configured organization.
    pub async fn list_repositories(&self) -> Result<Vec<RepositorySummary>> {
        #[derive(Deserialize)]
        struct Listing {
            repositories: Vec<RepositorySummary>,
        }

        let listing: Listing = self
            .client
            .get(&self.api_url)
            .query(&[("public", "true"), ("namespace", self.organization.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(listing.repositories)
    }

    /// Tag names of one repository.
    pub async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        let url = format!("{}/{}/{}", self.api_url, self.organization, repository);
        let body: serde_json::Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let tags = body
            .get("tags")
            .and_then(|t| t.as_object())
            .ok_or_else(|| {
                RegistryError::UnexpectedResponse(format!("no tags object for {}", repository))
            })?;
        Ok(tags.keys().cloned().collect())
    }

    /// Every container of the organization as `name:tag`.
    pub async fn list_containers(&self) -> Result<Vec<String>> {
        let mut containers = Vec::new();
        for repository in self.list_repositories().await? {
            tracing::info!("listing tags for {}", repository.name);
            let tags = self.list_tags(&repository.name).await?;
            for tag in tags {
                containers.push(format!("{}:{}", repository.name, tag));
            }
        }
        Ok(containers)
    }

    /// Search repositories by name substring; `non_strict` widens the match
    /// to descriptions. Hits are expanded with every available tag.
    pub async fn search(&self, query: &str, non_strict: bool) -> Result<Vec<SearchHit>> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();
        for repository in self.list_repositories().await? {
            let name_match = repository.name.to_lowercase().contains(&needle);
            let description_match = non_strict
                && repository
                    .description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false);
            if !name_match && !description_match {
                continue;
            }
            for tag in self.list_tags(&repository.name).await? {
                hits.push(SearchHit {
                    package: repository.name.clone(),
                    version: tag,
                });
            }
        }
        Ok(hits)
    }

    /// Check whether a container already exists under the package hash, and
    /// whether the version hash appears among its tags. Tags carry a
    /// trailing `-<build>` suffix that is stripped before comparison.
    pub async fn check_hash(&self, hash: &MulledHash) -> Result<HashStatus> {
        let url = format!("{}/{}/{}", self.api_url, self.organization, hash.package_hash);
        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(HashStatus {
                container_present: false,
                container_present_with_version: None,
            });
        }
        let body: serde_json::Value = response.error_for_status()?.json().await?;

        let with_version = match &hash.version_hash {
            Some(version_hash) => {
                let tags: Vec<String> = body
                    .get("tags")
                    .and_then(|t| t.as_object())
                    .map(|t| t.keys().cloned().collect())
                    .unwrap_or_default();
                Some(
                    tags.iter()
                        .any(|tag| strip_build_suffix(tag) == version_hash),
                )
            }
            None => None,
        };

        Ok(HashStatus {
            container_present: true,
            container_present_with_version: with_version,
        })
    }
}

/// Strip the trailing `-<build-number>` from a tag. Build numbers can run to
/// several digits, so this matches the numeric suffix pattern instead of
/// slicing a fixed width.
pub fn strip_build_suffix(tag: &str) -> &str {
    let re = Regex::new(r"-\d+$").unwrap();
    match re.find(tag) {
        Some(found) => &tag[..found.start()],
        None => tag,
    }
}
