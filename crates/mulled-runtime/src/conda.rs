//! Conda environment creation and testing

use mulled_core::{TargetSet, TestSpec};

use crate::error::Result;
use crate::exec::{require_binary, run_shell};
use crate::report::TestError;
use crate::rewrite::rewrite_command;

/// Environment directory name for a container: `__<name>@<version>`, the
/// build suffix dropped.
pub fn env_name_for(container: &str) -> String {
    let base = container.split("--").next().unwrap_or(container);
    format!("__{}", base.replace(':', "@"))
}

pub struct CondaRuntime {
    binary: String,
    channel: String,
}

impl CondaRuntime {
    pub fn new(binary: &str, channel: &str) -> Self {
        Self {
            binary: binary.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Create an environment holding the given package set.
    pub fn create_env(&self, env_name: &str, targets: &TargetSet) -> Result<()> {
        require_binary(&self.binary)?;
        let specs: Vec<String> = targets
            .iter()
            .map(|t| match (&t.version, &t.build) {
                (Some(version), Some(build)) => format!("{}={}={}", t.name, version, build),
                (Some(version), None) => format!("{}={}", t.name, version),
                _ => t.name.clone(),
            })
            .collect();
        let command = format!(
            "{} create -y --name {} -c {} {}",
            self.binary,
            env_name,
            self.channel,
            specs.join(" ")
        );
        run_shell(&command).map(|_| ())
    }

    /// Run a resolved test spec inside an activated environment.
    pub fn run_test(&self, env_name: &str, spec: &TestSpec) -> Result<Vec<TestError>> {
        let mut errors = Vec::new();

        for command in &spec.commands {
            let command = rewrite_command(command);
            let wrapped = format!(
                "source activate {} && bash -c \"{}\"",
                env_name, command
            );
            if run_shell(&wrapped).is_ok() {
                continue;
            }
            let bare = format!("source activate {} && {}", env_name, command);
            if let Err(err) = run_shell(&bare) {
                errors.push(TestError::from_failure(command.clone(), err));
            }
        }

        for import in &spec.imports {
            let check = format!(
                "source activate {} && {} 'import {}'",
                env_name,
                spec.import_lang.invocation(),
                import
            );
            if let Err(err) = run_shell(&check) {
                errors.push(TestError::from_failure(format!("import {}", import), err));
            }
        }

        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_name_for() {
        assert_eq!(env_name_for("samtools:1.3.1--py35_0"), "__samtools@1.3.1");
        assert_eq!(env_name_for("samtools:latest"), "__samtools@latest");
        assert_eq!(env_name_for("abundancebin:1.0.1--0"), "__abundancebin@1.0.1");
    }
}
