//! Smoke-test reporting

use mulled_core::TestSpec;
use serde::Serialize;

/// One failed command or import check, with the captured output.
#[derive(Debug, Clone, Serialize)]
pub struct TestError {
    pub command: String,
    pub output: String,
}

impl TestError {
    /// Build an error entry out of a failed shell-out, keeping the captured
    /// command output when there is one.
    pub fn from_failure(command: String, err: crate::error::RuntimeError) -> Self {
        let output = match err {
            crate::error::RuntimeError::CommandFailed { output, .. } => output,
            other => other.to_string(),
        };
        Self { command, output }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedTest {
    pub container: String,
    pub errors: Vec<TestError>,
}

/// Accumulated outcome over a batch of containers/environments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestReport {
    pub passed: Vec<String>,
    pub failed: Vec<FailedTest>,
    pub notest: Vec<String>,
}

impl TestReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a spec's outcome: no declared test, a clean pass, or a failure
    /// with its collected errors.
    pub fn record(&mut self, spec: &TestSpec, errors: Vec<TestError>) {
        if !spec.is_found() {
            self.notest.push(spec.container.clone());
        } else if errors.is_empty() {
            self.passed.push(spec.container.clone());
        } else {
            self.failed.push(FailedTest {
                container: spec.container.clone(),
                errors,
            });
        }
    }

    /// Render the log format consumed by downstream tooling.
    pub fn render_log(&self, header: &str) -> String {
        let mut log = String::from(header);
        log.push_str("\n\tTEST PASSED:");
        for container in &self.passed {
            log.push_str(&format!("\n\t\t{}", container));
        }
        log.push_str("\n\tTEST FAILED:");
        for failed in &self.failed {
            log.push_str(&format!("\n\t\t{}", failed.container));
            for error in &failed.errors {
                log.push_str(&format!(
                    "\n\t\t\tCOMMAND: {}\n\t\t\t\tERROR:{}",
                    error.command, error.output
                ));
            }
        }
        log.push_str("\n\tNO TEST AVAILABLE:");
        for container in &self.notest {
            log.push_str(&format!("\n\t\t{}", container));
        }
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with_commands(container: &str) -> TestSpec {
        TestSpec {
            commands: vec!["true".to_string()],
            container: container.to_string(),
            ..TestSpec::default()
        }
    }

    #[test]
    fn test_record_outcomes() {
        let mut report = TestReport::new();
        report.record(&spec_with_commands("samtools:1.6--0"), Vec::new());
        report.record(
            &spec_with_commands("pybigwig:0.1.11--py36_0"),
            vec![TestError {
                command: "python -c 'import pyBigWig'".to_string(),
                output: "ModuleNotFoundError".to_string(),
            }],
        );
        report.record(&TestSpec::empty_for("yasm:1.3.0--0"), Vec::new());

        assert_eq!(report.passed, ["samtools:1.6--0"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].container, "pybigwig:0.1.11--py36_0");
        assert_eq!(report.notest, ["yasm:1.3.0--0"]);
    }

    #[test]
    fn test_render_log_sections() {
        let mut report = TestReport::new();
        report.record(&spec_with_commands("samtools:1.6--0"), Vec::new());
        report.record(&TestSpec::empty_for("yasm:1.3.0--0"), Vec::new());

        let log = report.render_log("SINGULARITY CONTAINERS GENERATED:");
        assert!(log.starts_with("SINGULARITY CONTAINERS GENERATED:"));
        assert!(log.contains("\tTEST PASSED:\n\t\tsamtools:1.6--0"));
        assert!(log.contains("\tNO TEST AVAILABLE:\n\t\tyasm:1.3.0--0"));
    }
}
