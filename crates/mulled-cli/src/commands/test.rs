use anyhow::Result;
use mulled_config::Config;
use mulled_resolve::TestResolver;
use mulled_runtime::{CondaRuntime, SingularityRuntime, TestReport, env_name_for};

use crate::cli::{Backend, TestArgs};
use crate::commands::containers_from;

pub async fn handle(args: TestArgs, config: &Config) -> Result<()> {
    let containers = containers_from(&args.containers, args.container_list.as_deref())?;
    if containers.is_empty() {
        anyhow::bail!("either containers or --container-list must be given");
    }

    let resolver = TestResolver::from_config(config, args.recipes_path.as_deref(), args.deep_search)?;
    let mut report = TestReport::new();

    let header = match args.backend {
        Backend::Singularity => "SINGULARITY CONTAINERS TESTED:",
        Backend::Conda => "CONDA ENVIRONMENTS TESTED:",
    };

    match args.backend {
        Backend::Singularity => {
            let image_dir = args.image_dir.as_deref().ok_or_else(|| {
                anyhow::anyhow!("--image-dir is required for the singularity backend")
            })?;
            let docker_source = format!("{}/{}", config.quay.pull_host, config.quay.organization);
            let singularity = SingularityRuntime::new(
                &config.runtime.singularity_bin,
                image_dir,
                &docker_source,
                false,
            );
            for container in &containers {
                let spec = resolver.resolve_container(container).await;
                let errors = if spec.is_found() {
                    singularity.run_test(&spec)?
                } else {
                    Vec::new()
                };
                report.record(&spec, errors);
            }
        }
        Backend::Conda => {
            let conda = CondaRuntime::new(&config.runtime.conda_bin, &config.conda.channel);
            for container in &containers {
                let spec = resolver.resolve_container(container).await;
                let errors = if spec.is_found() {
                    conda.run_test(&env_name_for(container), &spec)?
                } else {
                    Vec::new()
                };
                report.record(&spec, errors);
            }
        }
    }

    std::fs::write(&args.logfile, report.render_log(header))?;
    println!(
        "{} passed, {} failed, {} without tests; results written to {}",
        report.passed.len(),
        report.failed.len(),
        report.notest.len(),
        args.logfile.display()
    );

    Ok(())
}
