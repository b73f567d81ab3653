//! Singularity image building and testing

use mulled_core::TestSpec;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::exec::{require_binary, run_shell};
use crate::report::TestError;
use crate::rewrite::rewrite_command;

pub struct SingularityRuntime {
    binary: String,
    image_dir: PathBuf,
    /// Docker source the images are pulled from, e.g. `quay.io/biocontainers`.
    docker_source: String,
    sudo: bool,
}

impl SingularityRuntime {
    pub fn new(
        binary: &str,
        image_dir: impl Into<PathBuf>,
        docker_source: &str,
        sudo: bool,
    ) -> Self {
        Self {
            binary: binary.to_string(),
            image_dir: image_dir.into(),
            docker_source: docker_source.to_string(),
            sudo,
        }
    }

    fn image_path(&self, container: &str) -> PathBuf {
        self.image_dir.join(container)
    }

    /// Build a singularity image from the docker container of the same name.
    pub fn build(&self, container: &str) -> Result<()> {
        require_binary(&self.binary)?;
        let image = self.image_path(container);
        let command = if self.sudo {
            format!(
                "sudo {} build {} docker://{}/{} && sudo rm -rf /root/.singularity/docker/",
                self.binary,
                image.display(),
                self.docker_source,
                container
            )
        } else {
            format!(
                "{} build {} docker://{}/{}",
                self.binary,
                image.display(),
                self.docker_source,
                container
            )
        };
        run_shell(&command).map(|_| ())
    }

    /// Run a resolved test spec inside a built image. Commands are tried
    /// wrapped in `bash -c` first and bare as a fallback; imports run
    /// through the spec's interpreter. Returns the collected failures.
    pub fn run_test(&self, spec: &TestSpec) -> Result<Vec<TestError>> {
        require_binary(&self.binary)?;

        // containers are mounted with a sanitised home directory
        let home = std::env::temp_dir().join("mulled-sing-home");
        std::fs::create_dir_all(&home)?;

        let image = self.image_path(&spec.container);
        let mut errors = Vec::new();

        for command in &spec.commands {
            let command = rewrite_command(command);
            let wrapped = format!(
                "{} exec -H {} {} bash -c \"{}\"",
                self.binary,
                home.display(),
                image.display(),
                command
            );
            if run_shell(&wrapped).is_ok() {
                continue;
            }
            let bare = format!(
                "{} exec -H {} {} {}",
                self.binary,
                home.display(),
                image.display(),
                command
            );
            if let Err(err) = run_shell(&bare) {
                errors.push(TestError::from_failure(command, err));
            }
        }

        for import in &spec.imports {
            let check = format!(
                "{} exec -H {} {} {} 'import {}'",
                self.binary,
                home.display(),
                image.display(),
                spec.import_lang.invocation(),
                import
            );
            if let Err(err) = run_shell(&check) {
                errors.push(TestError::from_failure(format!("import {}", import), err));
            }
        }

        Ok(errors)
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}
