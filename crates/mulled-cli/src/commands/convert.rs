use anyhow::Result;
use mulled_config::Config;
use mulled_resolve::TestResolver;
use mulled_runtime::{SingularityRuntime, TestReport};

use crate::cli::ConvertArgs;
use crate::commands::containers_from;

pub async fn handle(args: ConvertArgs, config: &Config) -> Result<()> {
    let containers = containers_from(&args.containers, args.container_list.as_deref())?;
    if containers.is_empty() {
        anyhow::bail!("either containers or --container-list must be given");
    }

    let docker_source = format!("{}/{}", config.quay.pull_host, config.quay.organization);
    let singularity = SingularityRuntime::new(
        &config.runtime.singularity_bin,
        &args.image_dir,
        &docker_source,
        !args.no_sudo,
    );

    for container in &containers {
        println!("building {}", container);
        if let Err(err) = singularity.build(container) {
            tracing::warn!("build of {} failed: {}", container, err);
        }
    }

    if let Some(logfile) = &args.test_log {
        let resolver =
            TestResolver::from_config(config, args.recipes_path.as_deref(), args.deep_search)?;
        let mut report = TestReport::new();
        for container in &containers {
            let spec = resolver.resolve_container(container).await;
            let errors = if spec.is_found() {
                singularity.run_test(&spec)?
            } else {
                Vec::new()
            };
            report.record(&spec, errors);
        }
        std::fs::write(logfile, report.render_log("SINGULARITY CONTAINERS GENERATED:"))?;
        println!("test results written to {}", logfile.display());
    }

    Ok(())
}
