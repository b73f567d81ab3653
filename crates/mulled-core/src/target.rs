//! Package target domain model

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A named software package with optional version/build qualifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageTarget {
    pub name: String,
    pub version: Option<String>,
    pub build: Option<String>,
}

impl PackageTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            build: None,
        }
    }

    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            build: None,
        }
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    /// Parse a `name[=version[=build]]` spec string, the format used by the
    /// multi-package combination listings.
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(CoreError::InvalidTarget(spec.to_string()));
        }
        let mut parts = spec.splitn(3, '=');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(CoreError::InvalidTarget(spec.to_string()));
        }
        let mut target = Self::new(name);
        if let Some(version) = parts.next().filter(|v| !v.is_empty()) {
            target.version = Some(version.to_string());
            if let Some(build) = parts.next().filter(|b| !b.is_empty()) {
                target.build = Some(build.to_string());
            }
        }
        Ok(target)
    }

    /// Parse a container identifier like `samtools:1.3.1--py35_0` into its
    /// name, version and build components.
    pub fn parse_container(container: &str) -> Result<Self> {
        let container = container.trim();
        if container.is_empty() {
            return Err(CoreError::InvalidTarget(container.to_string()));
        }
        let mut parts = container.replace("--", ":");
        // trailing separators would produce empty components
        while parts.ends_with(':') {
            parts.pop();
        }
        let mut pieces = parts.splitn(3, ':');
        let name = pieces.next().unwrap_or_default();
        if name.is_empty() {
            return Err(CoreError::InvalidTarget(container.to_string()));
        }
        let mut target = Self::new(name);
        if let Some(version) = pieces.next() {
            target.version = Some(version.to_string());
            if let Some(build) = pieces.next() {
                target.build = Some(build.to_string());
            }
        }
        Ok(target)
    }

    /// Archive filename stem: `name-version` or `name-version-build`.
    pub fn archive_stem(&self) -> String {
        let mut stem = self.name.clone();
        if let Some(version) = &self.version {
            stem.push('-');
            stem.push_str(version);
            if let Some(build) = &self.build {
                stem.push('-');
                stem.push_str(build);
            }
        }
        stem
    }

    /// Container identifier: `name`, `name:version` or `name:version--build`.
    pub fn container_id(&self) -> String {
        let mut id = self.name.clone();
        if let Some(version) = &self.version {
            id.push(':');
            id.push_str(version);
            if let Some(build) = &self.build {
                id.push_str("--");
                id.push_str(build);
            }
        }
        id
    }
}

/// An unordered collection of package targets, unique by name.
///
/// Duplicate package names are a caller error and are rejected on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSet {
    targets: Vec<PackageTarget>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: PackageTarget) -> Result<()> {
        if self.targets.iter().any(|t| t.name == target.name) {
            return Err(CoreError::DuplicatePackage(target.name));
        }
        self.targets.push(target);
        Ok(())
    }

    pub fn from_targets(targets: impl IntoIterator<Item = PackageTarget>) -> Result<Self> {
        let mut set = Self::new();
        for target in targets {
            set.insert(target)?;
        }
        Ok(set)
    }

    /// Parse a list of `name[=version[=build]]` spec strings.
    pub fn from_specs<S: AsRef<str>>(specs: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::from_targets(
            specs
                .into_iter()
                .map(|s| PackageTarget::parse_spec(s.as_ref()))
                .collect::<Result<Vec<_>>>()?,
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets ordered by package name, case-sensitive ascending. This is the
    /// canonical order for hashing.
    pub fn sorted(&self) -> Vec<&PackageTarget> {
        let mut ordered: Vec<&PackageTarget> = self.targets.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        ordered
    }
}
