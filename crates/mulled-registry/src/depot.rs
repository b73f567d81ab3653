//! Singularity depot index
//!
//! The depot publishes built singularity images behind a plain directory
//! index; container names are the link targets, with `:` percent-encoded.

use regex::Regex;
use std::time::Duration;

use crate::error::Result;
use crate::quay::SearchHit;

pub struct SingularityDepot {
    client: reqwest::Client,
    depot_url: String,
}

impl SingularityDepot {
    pub fn new(depot_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (depot index)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            depot_url: depot_url.to_string(),
        })
    }

    pub fn depot_url(&self) -> &str {
        &self.depot_url
    }

    /// All containers listed on the depot index page.
    pub async fn list_containers(&self) -> Result<Vec<String>> {
        let page = self
            .client
            .get(&self.depot_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_index(&page))
    }

    /// Containers whose name contains the search term, split into
    /// package/version pairs.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        let mut hits = Vec::new();
        for container in self.list_containers().await? {
            if !container.contains(term) {
                continue;
            }
            let (package, version) = match container.split_once(':') {
                Some((package, version)) => (package.to_string(), version.to_string()),
                None => (container.clone(), String::new()),
            };
            hits.push(SearchHit { package, version });
        }
        Ok(hits)
    }
}

/// Pull container names out of a directory index page: every link target,
/// percent-decoded, minus the parent-directory entry.
fn parse_index(page: &str) -> Vec<String> {
    let href_re = Regex::new(r#"href="([^"]+)""#).unwrap();
    href_re
        .captures_iter(page)
        .map(|capture| capture[1].replace("%3A", ":"))
        .filter(|href| href != "../")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        let page = r#"<html><body>
            <a href="../">../</a>
            <a href="aragorn%3A1.2.36--1">aragorn:1.2.36--1</a>
            <a href="samtools%3A1.3.1--5">samtools:1.3.1--5</a>
        </body></html>"#;
        let containers = parse_index(page);
        assert_eq!(containers, ["aragorn:1.2.36--1", "samtools:1.3.1--5"]);
    }

    #[test]
    fn test_parse_empty_index() {
        assert!(parse_index("<html></html>").is_empty());
    }
}
