pub mod convert;
pub mod env;
pub mod hash;
pub mod list;
pub mod resolve;
pub mod search;
pub mod test;

use anyhow::Result;
use std::path::Path;

/// Containers given directly on the command line plus any listed one per
/// line in a file; blank lines are skipped.
pub fn containers_from(containers: &[String], list_file: Option<&Path>) -> Result<Vec<String>> {
    let mut all: Vec<String> = containers.to_vec();
    if let Some(path) = list_file {
        let content = std::fs::read_to_string(path)?;
        all.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers_from_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("containers.txt");
        std::fs::write(
            &path,
            "bbmap:36.84--0\nbiobambam:2.0.42--0\n\ndiamond:0.8.26--0\n",
        )
        .unwrap();

        let containers =
            containers_from(&["connor:0.5.1--py35_0".to_string()], Some(path.as_path())).unwrap();
        assert_eq!(
            containers,
            [
                "connor:0.5.1--py35_0",
                "bbmap:36.84--0",
                "biobambam:2.0.42--0",
                "diamond:0.8.26--0"
            ]
        );
    }

    #[test]
    fn test_containers_from_args_only() {
        let containers = containers_from(&["samtools:1.3.1--0".to_string()], None).unwrap();
        assert_eq!(containers, ["samtools:1.3.1--0"]);
    }
}
