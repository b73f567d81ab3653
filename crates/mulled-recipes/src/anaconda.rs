//! Anaconda package archive access
//!
//! Pre-built packages are published as `.tar.bz2` archives that embed the
//! recipe they were built from under `info/recipe/`. When the recipes
//! repository yields no test, the archive's own copy of meta.yaml or
//! run_test.sh is the next best source.

use mulled_core::{PackageTarget, TestSpec};
use regex::Regex;
use std::io::Read;
use std::time::Duration;

use crate::error::{RecipeError, Result};
use crate::meta::parse_meta_tests;
use crate::script::parse_script_tests;

const META_MEMBER: &str = "info/recipe/meta.yaml";
const SCRIPT_MEMBER: &str = "info/recipe/run_test.sh";

pub struct AnacondaClient {
    client: reqwest::Client,
    base_url: String,
    channel: String,
    platform: String,
}

impl AnacondaClient {
    pub fn new(base_url: &str, channel: &str, platform: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("mulled/0.2 (archive client)")
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            channel: channel.to_string(),
            platform: platform.to_string(),
        })
    }

    /// Download URL for a target's pre-built archive:
    /// `<host>/<channel>/<name>/<version>/download/<platform>/<name>-<version>(-<build>).tar.bz2`
    pub fn archive_url(&self, target: &PackageTarget) -> Result<String> {
        let version = target
            .version
            .as_deref()
            .ok_or_else(|| RecipeError::NotFound(format!("{} has no version", target.name)))?;
        Ok(format!(
            "{}/{}/{}/{}/download/{}/{}.tar.bz2",
            self.base_url,
            self.channel,
            target.name,
            version,
            self.platform,
            target.archive_stem()
        ))
    }

    /// Fetch a target's archive and extract its embedded tests.
    pub async fn fetch_tests(&self, target: &PackageTarget) -> Result<Option<TestSpec>> {
        let url = self.archive_url(target)?;
        self.fetch_tests_from_url(&url).await
    }

    /// Fetch an archive by URL and extract its embedded tests: meta.yaml
    /// first, run_test.sh as a fallback. An unreadable archive yields `None`.
    pub async fn fetch_tests_from_url(&self, url: &str) -> Result<Option<TestSpec>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(tests_from_archive(&bytes))
    }

    /// Archive download URLs listed on the package's files page, one per
    /// published version/build for the configured platform.
    pub async fn list_archive_urls(&self, package: &str) -> Result<Vec<String>> {
        let url = format!("{}/{}/{}/files", self.base_url, self.channel, package);
        let page = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let href_re = Regex::new(r#"href="([^"]+)""#).unwrap();
        let mut urls = Vec::new();
        for capture in href_re.captures_iter(&page) {
            let href = &capture[1];
            if !href.contains("download/linux") {
                continue;
            }
            urls.push(self.absolute_url(href));
        }
        Ok(urls)
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if let Some(rest) = href.strip_prefix("//") {
            format!("https://{}", rest)
        } else {
            format!("{}/{}", self.base_url, href.trim_start_matches('/'))
        }
    }
}

/// Extract tests from archive bytes. Archive and member read failures are
/// logged and treated as "no test here".
fn tests_from_archive(bytes: &[u8]) -> Option<TestSpec> {
    if let Some(meta) = extract_member(bytes, META_MEMBER) {
        if let Some(spec) = parse_meta_tests(&meta) {
            return Some(spec);
        }
    }
    extract_member(bytes, SCRIPT_MEMBER).and_then(|script| parse_script_tests(&script))
}

fn extract_member(bytes: &[u8], member: &str) -> Option<String> {
    let decoder = bzip2::read::BzDecoder::new(bytes);
    let mut archive = tar::Archive::new(decoder);
    let entries = match archive.entries() {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("archive unreadable: {}", err);
            return None;
        }
    };
    for entry in entries {
        let mut entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("archive entry unreadable: {}", err);
                return None;
            }
        };
        let matches = entry
            .path()
            .map(|p| p.as_ref() == std::path::Path::new(member))
            .unwrap_or(false);
        if matches {
            let mut content = String::new();
            if let Err(err) = entry.read_to_string(&mut content) {
                tracing::debug!("archive member {} unreadable: {}", member, err);
                return None;
            }
            return Some(content);
        }
    }
    None
}
