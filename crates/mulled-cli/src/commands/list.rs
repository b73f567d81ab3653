use anyhow::Result;
use mulled_config::Config;
use mulled_registry::{
    QuayRegistry, SingularityDepot, conda_env_names, missing_containers, missing_envs,
    read_skip_list,
};
use std::io::Write;

use crate::cli::{ListArgs, ListSource};

pub async fn handle(args: ListArgs, config: &Config) -> Result<()> {
    let skip = match &args.skip_list {
        Some(path) => read_skip_list(path)?,
        None => Vec::new(),
    };

    let containers = match args.source {
        ListSource::Docker => {
            let quay = QuayRegistry::new(&config.quay.api_url, &config.quay.organization)?;
            let mut containers = quay.list_containers().await?;
            if args.not_singularity {
                let depot = SingularityDepot::new(&config.singularity.depot_url)?;
                containers =
                    missing_containers(&containers, &depot.list_containers().await?, &skip);
            }
            if args.not_conda {
                let conda_dir = args
                    .conda_dir
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("--conda-dir is required with --not-conda"))?;
                containers = missing_envs(&containers, &conda_env_names(conda_dir)?, &skip);
            }
            containers
        }
        ListSource::Singularity => {
            SingularityDepot::new(&config.singularity.depot_url)?
                .list_containers()
                .await?
        }
        ListSource::Conda => {
            let conda_dir = args.conda_dir.as_deref().ok_or_else(|| {
                anyhow::anyhow!("--conda-dir is required when listing conda environments")
            })?;
            conda_env_names(conda_dir)?
        }
    };

    match &args.output {
        Some(path) => {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            for container in &containers {
                writeln!(file, "{}", container)?;
            }
            println!("{} entries written to {}", containers.len(), path.display());
        }
        None => {
            for container in &containers {
                println!("{}", container);
            }
        }
    }

    Ok(())
}
