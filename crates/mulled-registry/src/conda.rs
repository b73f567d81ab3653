//! Conda channel search
//!
//! Searches run through the conda binary itself; a missing binary or a
//! failed search yields no results rather than an error, matching the
//! best-effort semantics of the other search destinations.

use serde::{Deserialize, Serialize};
use std::process::Command;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondaPackage {
    pub package: String,
    pub version: String,
    pub build: String,
}

pub struct CondaChannel {
    channel: String,
    conda_bin: String,
}

impl CondaChannel {
    pub fn new(channel: &str, conda_bin: &str) -> Self {
        Self {
            channel: channel.to_string(),
            conda_bin: conda_bin.to_string(),
        }
    }

    /// Search the channel for a package name. Returns one entry per
    /// version/build row reported by `conda search`.
    pub async fn search(&self, term: &str) -> Result<Vec<CondaPackage>> {
        if which::which(&self.conda_bin).is_err() {
            tracing::info!("conda binary {} not found, skipping search", self.conda_bin);
            return Ok(Vec::new());
        }

        let output = Command::new(&self.conda_bin)
            .args(["search", "-c", &self.channel, term])
            .output()?;

        if !output.status.success() {
            tracing::info!(
                "conda search failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
            return Ok(Vec::new());
        }

        Ok(parse_search_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `conda search` output: skip the loading banner and the column
/// header, take name/version/build from each remaining row.
fn parse_search_output(output: &str) -> Vec<CondaPackage> {
    output
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with("Loading")
        })
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            Some(CondaPackage {
                package: fields.next()?.to_string(),
                version: fields.next()?.to_string(),
                build: fields.next()?.to_string(),
            })
        })
        .collect()
}
