use anyhow::Result;
use mulled_config::Config;
use mulled_core::{PackageTarget, TargetSet};
use mulled_resolve::CombinationsClient;
use mulled_runtime::{CondaRuntime, DockerRuntime, env_name_for};

use crate::cli::{BuildEnvArgs, ExtractEnvArgs};
use crate::commands::containers_from;

pub async fn handle_extract(args: ExtractEnvArgs, config: &Config) -> Result<()> {
    let containers = containers_from(&args.containers, args.container_list.as_deref())?;
    if containers.is_empty() {
        anyhow::bail!("either containers or --container-list must be given");
    }

    let registry = format!("{}/{}", config.quay.pull_host, config.quay.organization);
    let docker = DockerRuntime::new(&config.runtime.docker_bin, &registry);

    for container in &containers {
        println!("extracting {}", container);
        if let Err(err) = docker.extract_env(container, &args.env_dir, !args.no_sudo) {
            tracing::warn!("extraction of {} failed: {}", container, err);
        }
    }

    Ok(())
}

pub async fn handle_build(args: BuildEnvArgs, config: &Config) -> Result<()> {
    let container = &args.container;

    // a hashed name refers to a registered multi-package combination
    let targets = if container.starts_with("mulled") {
        let combinations =
            CombinationsClient::new(&config.github.api_url, &config.github.combinations_repo)?;
        let package_hash = container.split(':').next().unwrap_or(container);
        combinations
            .lookup(package_hash)
            .await?
            .ok_or_else(|| anyhow::anyhow!("container name {} not recognized", container))?
    } else {
        TargetSet::from_targets([PackageTarget::parse_container(container)?])?
    };

    let conda = CondaRuntime::new(&config.runtime.conda_bin, &config.conda.channel);
    let env_name = env_name_for(container);
    conda.create_env(&env_name, &targets)?;
    println!("created environment {}", env_name);

    Ok(())
}
