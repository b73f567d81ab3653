//! Container and environment listings
//!
//! Set differences between what the docker registry carries and what has
//! already been mirrored as singularity images or extracted as conda
//! environments. An optional skip-list file names containers to ignore.

use std::path::Path;

use crate::error::Result;

/// Conda environment names under a directory. Environments are stored as
/// `__<name>@<version>` directories; the listing restores the `name:version`
/// form.
pub fn conda_env_names(dir: &Path) -> Result<Vec<String>> {
    let pattern = format!("{}/*", dir.display());
    let mut names = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| anyhow::anyhow!("bad glob pattern: {}", e))? {
        let path = entry.map_err(|e| anyhow::anyhow!("glob entry failed: {}", e))?;
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let name = file_name
            .rsplit("__")
            .next()
            .unwrap_or(file_name)
            .replace('@', ":");
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Read a skip-list file: one container name per line, blank lines ignored.
pub fn read_skip_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Containers present in the registry but not yet in the singularity depot.
pub fn missing_containers(
    quay: &[String],
    singularity: &[String],
    skip: &[String],
) -> Vec<String> {
    quay.iter()
        .filter(|container| {
            !singularity.contains(container) && !skip.contains(container)
        })
        .cloned()
        .collect()
}

/// Containers present in the registry but without an extracted conda
/// environment. The registry names carry a `--<build>` suffix the
/// environments do not, so comparison happens on the stripped form.
pub fn missing_envs(quay: &[String], conda: &[String], skip: &[String]) -> Vec<String> {
    quay.iter()
        .filter(|container| {
            let stripped = container
                .split("--")
                .next()
                .unwrap_or(container.as_str())
                .to_string();
            !conda.contains(&stripped) && !skip.contains(&stripped)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_containers() {
        let quay = strings(&["1", "2", "3", "h", "g", "r"]);
        let singularity = strings(&["3", "4", "5"]);
        let skip = strings(&["l", "g", "n", "r"]);
        assert_eq!(
            missing_containers(&quay, &singularity, &skip),
            strings(&["1", "2", "h"])
        );
    }

    #[test]
    fn test_missing_envs_strips_build_suffix() {
        let quay = strings(&["1", "2", "3", "h--1", "g--2", "r"]);
        let conda = strings(&["3", "4", "5"]);
        let skip = strings(&["l", "g", "n", "r"]);
        assert_eq!(
            missing_envs(&quay, &conda, &skip),
            strings(&["1", "2", "h--1"])
        );
    }

    #[test]
    fn test_conda_env_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("__samtools@1.3.1")).unwrap();
        std::fs::create_dir(dir.path().join("__bamtools@2.4.0")).unwrap();
        let names = conda_env_names(dir.path()).unwrap();
        assert_eq!(names, strings(&["bamtools:2.4.0", "samtools:1.3.1"]));
    }

    #[test]
    fn test_read_skip_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skip.txt");
        std::fs::write(&path, "a\n\nb\nc\n").unwrap();
        assert_eq!(read_skip_list(&path).unwrap(), strings(&["a", "b", "c"]));
    }
}
