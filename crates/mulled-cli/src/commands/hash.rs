use anyhow::Result;
use mulled_config::Config;
use mulled_core::{TargetSet, compute_hash};
use mulled_registry::QuayRegistry;

use crate::cli::HashArgs;

pub async fn handle(args: HashArgs, config: &Config) -> Result<()> {
    let targets = TargetSet::from_specs(&args.targets)?;
    let hash = compute_hash(&targets)?;

    let status = if args.check {
        let quay = QuayRegistry::new(&config.quay.api_url, &config.quay.organization)?;
        Some(quay.check_hash(&hash).await?)
    } else {
        None
    };

    if args.json {
        let mut value = serde_json::json!({
            "package_hash": hash.package_hash,
            "version_hash": hash.version_hash,
        });
        if let Some(status) = &status {
            value["container_present"] = serde_json::json!(status.container_present);
            if let Some(with_version) = status.container_present_with_version {
                value["container_present_with_version"] = serde_json::json!(with_version);
            }
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Package hash: {}", hash.package_hash);
    if let Some(version_hash) = &hash.version_hash {
        println!("Version hash: {}", version_hash);
    }
    if let Some(status) = &status {
        println!(
            "Container present: {}",
            if status.container_present { "yes" } else { "no" }
        );
        if let Some(with_version) = status.container_present_with_version {
            println!(
                "Container present with version: {}",
                if with_version { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
