//! Deterministic package-set hash
//!
//! Maps a target set to the two-part identifier used to name multi-package
//! container images: a package hash over the set of names and, when every
//! target is versioned, a version hash over the name-ordered version strings.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::{CoreError, Result};
use crate::target::TargetSet;

/// Prefix of every package hash.
pub const HASH_PREFIX: &str = "mulled-v2-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulledHash {
    pub package_hash: String,
    pub version_hash: Option<String>,
}

impl MulledHash {
    /// Full image name: `package_hash` alone, or `package_hash:version_hash`
    /// when a version hash is available.
    pub fn image_name(&self) -> String {
        match &self.version_hash {
            Some(version_hash) => format!("{}:{}", self.package_hash, version_hash),
            None => self.package_hash.clone(),
        }
    }
}

fn sha1_hex(buffer: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(buffer.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the deterministic identifier for a set of package targets.
///
/// Targets are canonicalized by sorting on the package name, so any
/// permutation of the same set yields the same result. The package hash
/// depends only on the names; the version hash is produced only when every
/// target carries a version. A set mixing versioned and unversioned targets
/// is a caller contract violation and fails fast.
pub fn compute_hash(targets: &TargetSet) -> Result<MulledHash> {
    if targets.is_empty() {
        return Err(CoreError::EmptyTargetSet);
    }

    let ordered = targets.sorted();

    let name_buffer = ordered
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let package_hash = format!("{}{}", HASH_PREFIX, sha1_hex(&name_buffer));

    let versioned = ordered.iter().filter(|t| t.version.is_some()).count();
    let version_hash = if versioned == ordered.len() {
        let version_buffer = ordered
            .iter()
            .map(|t| {
                let version = t.version.as_deref().unwrap_or_default();
                match &t.build {
                    Some(build) => format!("{}={}", version, build),
                    None => version.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        Some(sha1_hex(&version_buffer))
    } else if versioned == 0 {
        None
    } else {
        return Err(CoreError::MixedVersions);
    };

    Ok(MulledHash {
        package_hash,
        version_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_hash_known_value() {
        let set = TargetSet::from_specs(["bamtools", "samtools"]).unwrap();
        let hash = compute_hash(&set).unwrap();
        assert_eq!(
            hash.package_hash,
            "mulled-v2-0560a8046fc82aa4338588eca29ff18edab2c5aa"
        );
        assert_eq!(hash.version_hash, None);
    }

    #[test]
    fn test_version_hash_known_value() {
        let set = TargetSet::from_specs(["bamtools=2.4.0", "samtools=1.3.1"]).unwrap();
        let hash = compute_hash(&set).unwrap();
        assert_eq!(
            hash.package_hash,
            "mulled-v2-0560a8046fc82aa4338588eca29ff18edab2c5aa"
        );
        assert_eq!(
            hash.version_hash.as_deref(),
            Some("c17ce694dd57ab0ac1a2b86bb214e65fedef760e")
        );
    }

    #[test]
    fn test_order_independence() {
        let forward = TargetSet::from_specs(["bamtools=2.4.0", "samtools=1.3.1"]).unwrap();
        let reverse = TargetSet::from_specs(["samtools=1.3.1", "bamtools=2.4.0"]).unwrap();
        assert_eq!(
            compute_hash(&forward).unwrap(),
            compute_hash(&reverse).unwrap()
        );
    }

    #[test]
    fn test_package_hash_ignores_versions() {
        let versionless = TargetSet::from_specs(["abricate", "abyss"]).unwrap();
        let versioned = TargetSet::from_specs(["abricate=0.4", "abyss=2.0.1"]).unwrap();
        let a = compute_hash(&versionless).unwrap();
        let b = compute_hash(&versioned).unwrap();
        assert_eq!(a.package_hash, b.package_hash);
        assert_eq!(
            b.version_hash.as_deref(),
            Some("e21d1262f064e1e01b6b9fad5bea117928f31b38")
        );
    }

    #[test]
    fn test_single_target_is_valid() {
        let set = TargetSet::from_specs(["samtools=1.3.1"]).unwrap();
        let hash = compute_hash(&set).unwrap();
        assert!(hash.package_hash.starts_with(HASH_PREFIX));
        assert!(hash.version_hash.is_some());
    }

    #[test]
    fn test_build_changes_version_hash_only() {
        let plain = TargetSet::from_specs(["bamtools=2.4.0", "samtools=1.3.1"]).unwrap();
        let with_build = TargetSet::from_specs(["bamtools=2.4.0=1", "samtools=1.3.1"]).unwrap();
        let a = compute_hash(&plain).unwrap();
        let b = compute_hash(&with_build).unwrap();
        assert_eq!(a.package_hash, b.package_hash);
        assert_ne!(a.version_hash, b.version_hash);
    }

    #[test]
    fn test_mixed_versions_fail_fast() {
        let set = TargetSet::from_specs(["bamtools=2.4.0", "samtools"]).unwrap();
        assert!(matches!(
            compute_hash(&set).unwrap_err(),
            CoreError::MixedVersions
        ));
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let set = TargetSet::new();
        assert!(matches!(
            compute_hash(&set).unwrap_err(),
            CoreError::EmptyTargetSet
        ));
    }

    #[test]
    fn test_image_name_composition() {
        let set = TargetSet::from_specs(["bamtools=2.4.0", "samtools=1.3.1"]).unwrap();
        let hash = compute_hash(&set).unwrap();
        assert_eq!(
            hash.image_name(),
            "mulled-v2-0560a8046fc82aa4338588eca29ff18edab2c5aa:c17ce694dd57ab0ac1a2b86bb214e65fedef760e"
        );
    }
}
