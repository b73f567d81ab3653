//! Test spec domain model

use serde::{Deserialize, Serialize};

/// Interpreter used to exercise declared import checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportLanguage {
    #[default]
    Python,
    Perl,
}

impl ImportLanguage {
    /// Shell invocation prefix for a one-liner import check.
    pub fn invocation(&self) -> &'static str {
        match self {
            ImportLanguage::Python => "python -c",
            ImportLanguage::Perl => "perl -e",
        }
    }
}

/// The commands and import checks that verify a built package or container
/// works. An empty spec (no commands, no imports) means no test was found;
/// callers record the package as untested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSpec {
    pub commands: Vec<String>,
    pub imports: Vec<String>,
    pub import_lang: ImportLanguage,
    pub container: String,
}

impl TestSpec {
    /// An empty spec attributed to the given container.
    pub fn empty_for(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            ..Self::default()
        }
    }

    /// A spec is found once at least one command or import is present.
    pub fn is_found(&self) -> bool {
        !self.commands.is_empty() || !self.imports.is_empty()
    }

    /// Fold another spec into this one; used when a multi-package container
    /// aggregates the tests of its member packages. Perl wins the import
    /// language so declared perl imports stay runnable.
    pub fn merge(&mut self, other: TestSpec) {
        self.commands.extend(other.commands);
        self.imports.extend(other.imports);
        if other.import_lang == ImportLanguage::Perl {
            self.import_lang = ImportLanguage::Perl;
        }
    }
}
