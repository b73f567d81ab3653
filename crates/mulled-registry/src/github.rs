//! GitHub recipe repository search

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// A code-search result inside the recipes repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeHit {
    pub name: String,
    pub path: String,
}

pub struct GithubSearch {
    client: reqwest::Client,
    api_url: String,
    repo: String,
}

impl GithubSearch {
    pub fn new(api_url: &str, repo: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (recipe search)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        })
    }

    /// Code search scoped to the repository's recipes tree; top ten results.
    pub async fn search_code(&self, term: &str) -> Result<Vec<CodeHit>> {
        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            items: Vec<CodeHit>,
        }

        let url = format!(
            "{}/search/code?q={}+in:path+repo:{}+path:recipes",
            self.api_url, term, self.repo
        );
        let response: SearchResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.items.into_iter().take(10).collect())
    }

    /// Whether a recipe directory exists that matches the name exactly.
    pub async fn recipe_present(&self, name: &str) -> Result<bool> {
        let url = format!("{}/repos/{}/contents/recipes/{}", self.api_url, self.repo, name);
        let response = self.client.get(url).send().await?;
        Ok(response.status().is_success())
    }
}
