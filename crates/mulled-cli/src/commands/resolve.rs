use anyhow::Result;
use mulled_config::Config;
use mulled_resolve::TestResolver;
use std::collections::BTreeMap;

use crate::cli::ResolveArgs;

pub async fn handle(args: ResolveArgs, config: &Config) -> Result<()> {
    let resolver = TestResolver::from_config(config, args.recipes_path.as_deref(), args.deep_search)?;

    let mut specs = BTreeMap::new();
    for container in &args.containers {
        let spec = resolver.resolve_container(container).await;
        specs.insert(container.clone(), spec);
    }

    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}
