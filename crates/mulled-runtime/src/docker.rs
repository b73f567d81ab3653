//! Docker container access

use std::path::Path;

use crate::conda::env_name_for;
use crate::error::Result;
use crate::exec::{require_binary, run_shell};

pub struct DockerRuntime {
    binary: String,
    /// Registry prefix the containers are pulled from, e.g.
    /// `quay.io/biocontainers`.
    registry: String,
}

impl DockerRuntime {
    pub fn new(binary: &str, registry: &str) -> Self {
        Self {
            binary: binary.to_string(),
            registry: registry.to_string(),
        }
    }

    /// Copy a container's /usr/local tree out into an environment directory
    /// named `__<name>@<version>`, then stop and remove the container.
    pub fn extract_env(&self, container: &str, env_dir: &Path, sudo: bool) -> Result<()> {
        require_binary(&self.binary)?;
        let env_name = env_name_for(container);
        let cp_prefix = if sudo { "sudo " } else { "" };
        let command = format!(
            "cid=`{bin} run -d {registry}/{container}` && \
             {cp_prefix}{bin} cp $cid:/usr/local/ {dir}/{env} && \
             {bin} stop $cid && {bin} rm $cid",
            bin = self.binary,
            registry = self.registry,
            container = container,
            cp_prefix = cp_prefix,
            dir = env_dir.display(),
            env = env_name,
        );
        run_shell(&command).map(|_| ())
    }
}
