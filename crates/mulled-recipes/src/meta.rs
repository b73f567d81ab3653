//! Test extraction from recipe metadata
//!
//! A recipe's meta.yaml declares its self-tests under `test.commands` and
//! `test.imports`, and its runtime requirements under `requirements.run`.
//! Absent fields, nulls and singleton null lists all count as "no test".

use mulled_core::{ImportLanguage, TestSpec};
use serde_yaml::Value;

use crate::template::render_template;

/// Parse templated recipe metadata and extract its declared tests.
///
/// Returns `None` when the document does not parse or declares no usable
/// commands or imports; a malformed source is indistinguishable from an
/// empty one as far as resolution is concerned.
pub fn parse_meta_tests(text: &str) -> Option<TestSpec> {
    let rendered = render_template(text);
    let meta: Value = match serde_yaml::from_str(&rendered) {
        Ok(meta) => meta,
        Err(err) => {
            tracing::debug!("recipe metadata failed to parse: {}", err);
            return None;
        }
    };

    let mut spec = TestSpec {
        commands: string_list(meta.get("test").and_then(|t| t.get("commands"))),
        imports: string_list(meta.get("test").and_then(|t| t.get("imports"))),
        ..TestSpec::default()
    };

    if !spec.is_found() {
        return None;
    }

    spec.import_lang = import_language(&meta);
    Some(spec)
}

/// Flatten a commands/imports field into its non-null string entries. A null
/// field, a `[null]` singleton and a missing field all yield an empty list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(other) => scalar_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Scripting language needed to run the import checks: perl when any run
/// requirement's first whitespace-delimited token is `perl`, python
/// otherwise.
fn import_language(meta: &Value) -> ImportLanguage {
    let requirements = meta
        .get("requirements")
        .and_then(|r| r.get("run"))
        .and_then(Value::as_sequence);
    if let Some(requirements) = requirements {
        for requirement in requirements.iter().filter_map(Value::as_str) {
            if requirement.split_whitespace().next() == Some("perl") {
                return ImportLanguage::Perl;
            }
        }
    }
    ImportLanguage::Python
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_and_imports_extracted() {
        let meta = "test:\n  commands:\n    - samtools --help\n  imports:\n    - pysam\n";
        let spec = parse_meta_tests(meta).unwrap();
        assert_eq!(spec.commands, ["samtools --help"]);
        assert_eq!(spec.imports, ["pysam"]);
        assert_eq!(spec.import_lang, ImportLanguage::Python);
    }

    #[test]
    fn test_null_singleton_is_degenerate() {
        let meta = "test:\n  commands:\n    - null\n  imports:\n";
        assert!(parse_meta_tests(meta).is_none());
    }

    #[test]
    fn test_missing_test_section() {
        assert!(parse_meta_tests("package:\n  name: samtools\n").is_none());
    }

    #[test]
    fn test_perl_requirement_flips_language() {
        let meta = "test:\n  imports:\n    - Bio::SeqIO\nrequirements:\n  run:\n    - perl >=5.22\n    - zlib\n";
        let spec = parse_meta_tests(meta).unwrap();
        assert_eq!(spec.import_lang, ImportLanguage::Perl);
    }

    #[test]
    fn test_perl_prefix_is_not_perl() {
        let meta = "test:\n  imports:\n    - Bio::SeqIO\nrequirements:\n  run:\n    - perl-bioperl\n";
        let spec = parse_meta_tests(meta).unwrap();
        assert_eq!(spec.import_lang, ImportLanguage::Python);
    }

    #[test]
    fn test_missing_requirements_defaults_to_python() {
        let meta = "test:\n  commands:\n    - samtools --help\n";
        let spec = parse_meta_tests(meta).unwrap();
        assert_eq!(spec.import_lang, ImportLanguage::Python);
    }

    #[test]
    fn test_templated_metadata_is_rendered_first() {
        let meta = "{% set version = \"1.3.1\" %}\ntest:\n  commands:\n    - samtools --help\n";
        let spec = parse_meta_tests(meta).unwrap();
        assert_eq!(spec.commands, ["samtools --help"]);
    }

    #[test]
    fn test_unparseable_document_is_none() {
        assert!(parse_meta_tests("test: [unterminated\n  - a\n").is_none());
    }
}
