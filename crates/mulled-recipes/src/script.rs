//! Test extraction from companion run_test.sh scripts

use mulled_core::TestSpec;

/// Convert a test script into a single synthetic command: the script's lines
/// joined with `&&` so they execute as one compound command, short-circuiting
/// on the first failure.
pub fn parse_script_tests(content: &str) -> Option<TestSpec> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    Some(TestSpec {
        commands: vec![lines.join(" && ")],
        ..TestSpec::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_joined_with_and() {
        let spec = parse_script_tests("samtools --help\nsamtools view --help\n").unwrap();
        assert_eq!(spec.commands, ["samtools --help && samtools view --help"]);
    }

    #[test]
    fn test_single_line_script() {
        let spec = parse_script_tests("samtools --help").unwrap();
        assert_eq!(spec.commands, ["samtools --help"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let spec = parse_script_tests("a\n\n\nb\n").unwrap();
        assert_eq!(spec.commands, ["a && b"]);
    }

    #[test]
    fn test_empty_script_is_none() {
        assert!(parse_script_tests("").is_none());
        assert!(parse_script_tests("\n\n").is_none());
    }
}
