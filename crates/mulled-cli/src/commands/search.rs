use anyhow::Result;
use mulled_config::Config;
use mulled_core::{TargetSet, compute_hash};
use mulled_registry::{
    CodeHit, CondaChannel, CondaPackage, GithubSearch, QuayRegistry, SearchHit, SingularityDepot,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::{Destination, SearchArgs};

#[derive(Default, Serialize)]
struct SearchResults {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    quay: BTreeMap<String, Vec<SearchHit>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    conda: BTreeMap<String, Vec<CondaPackage>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    singularity: BTreeMap<String, Vec<SearchHit>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    github: BTreeMap<String, Vec<CodeHit>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    github_recipe_present: Vec<String>,
}

impl SearchResults {
    fn is_empty(&self) -> bool {
        self.quay.values().all(Vec::is_empty)
            && self.conda.values().all(Vec::is_empty)
            && self.singularity.values().all(Vec::is_empty)
            && self.github.values().all(Vec::is_empty)
            && self.github_recipe_present.is_empty()
    }
}

pub async fn handle(args: SearchArgs, config: &Config) -> Result<()> {
    let destinations = args.destinations.clone().unwrap_or_else(|| {
        vec![
            Destination::Quay,
            Destination::Conda,
            Destination::Singularity,
        ]
    });
    let organization = args
        .organization
        .as_deref()
        .unwrap_or(&config.quay.organization);
    let channel = args.channel.as_deref().unwrap_or(&config.conda.channel);

    let mut terms = args.search.clone();
    // a multi-package query is also looked up under its combined hash
    if terms.len() > 1 {
        let set = TargetSet::from_specs(&terms)?;
        terms.push(compute_hash(&set)?.package_hash);
    }

    let mut results = SearchResults::default();

    if destinations.contains(&Destination::Quay) {
        let quay = QuayRegistry::new(&config.quay.api_url, organization)?;
        for term in &terms {
            results
                .quay
                .insert(term.clone(), quay.search(term, args.non_strict).await?);
        }
    }

    if destinations.contains(&Destination::Conda) {
        let conda = CondaChannel::new(channel, &config.runtime.conda_bin);
        for term in &terms {
            results.conda.insert(term.clone(), conda.search(term).await?);
        }
    }

    if destinations.contains(&Destination::Github) {
        let github = GithubSearch::new(&config.github.api_url, &config.github.recipes_repo)?;
        for term in &terms {
            results
                .github
                .insert(term.clone(), github.search_code(term).await?);
            if github.recipe_present(term).await? {
                results.github_recipe_present.push(term.clone());
            }
        }
    }

    if destinations.contains(&Destination::Singularity) {
        let depot = SingularityDepot::new(&config.singularity.depot_url)?;
        for term in &terms {
            results
                .singularity
                .insert(term.clone(), depot.search(term).await?);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_readable(&results, organization, channel, config);
    }

    Ok(())
}

fn print_readable(results: &SearchResults, organization: &str, channel: &str, config: &Config) {
    if results.is_empty() {
        println!("No results found for that query.");
        return;
    }

    let mut lines: Vec<[String; 4]> = Vec::new();
    for hits in results.quay.values() {
        for hit in hits {
            lines.push([
                "quay".to_string(),
                hit.package.clone(),
                hit.version.clone(),
                format!(
                    "docker pull {}/{}/{}:{}",
                    config.quay.pull_host, organization, hit.package, hit.version
                ),
            ]);
        }
    }
    for packages in results.conda.values() {
        for package in packages {
            lines.push([
                "conda".to_string(),
                package.package.clone(),
                format!("{}--{}", package.version, package.build),
                format!(
                    "conda install -c {} {}={}={}",
                    channel, package.package, package.version, package.build
                ),
            ]);
        }
    }
    for hits in results.singularity.values() {
        for hit in hits {
            lines.push([
                "singularity".to_string(),
                hit.package.clone(),
                hit.version.clone(),
                format!(
                    "wget {}{}:{}",
                    config.singularity.depot_url, hit.package, hit.version
                ),
            ]);
        }
    }

    if !lines.is_empty() {
        println!("The query returned the following result(s).");
        print_table(
            &["LOCATION", "NAME", "VERSION", "COMMAND"],
            &lines.iter().map(|l| l.iter().map(String::as_str).collect()).collect::<Vec<Vec<&str>>>(),
        );
    }

    if !results.github_recipe_present.is_empty() {
        println!();
        println!(
            "The following recipes were found in the recipes repository which exactly matched one of the search terms:"
        );
        let rows: Vec<Vec<String>> = results
            .github_recipe_present
            .iter()
            .map(|recipe| {
                vec![
                    recipe.clone(),
                    format!(
                        "https://github.com/{}/tree/master/recipes/{}",
                        config.github.recipes_repo, recipe
                    ),
                ]
            })
            .collect();
        print_table(
            &["QUERY", "LOCATION"],
            &rows.iter().map(|r| r.iter().map(String::as_str).collect()).collect::<Vec<Vec<&str>>>(),
        );
    }

    if results.github.values().any(|hits| !hits.is_empty()) {
        println!();
        println!("Other result(s) on the recipes repository:");
        let mut rows: Vec<Vec<String>> = Vec::new();
        for (term, hits) in &results.github {
            for hit in hits {
                rows.push(vec![
                    term.clone(),
                    hit.name.clone(),
                    format!(
                        "https://github.com/{}/tree/master/{}",
                        config.github.recipes_repo, hit.path
                    ),
                ]);
            }
        }
        print_table(
            &["QUERY", "FILE", "URL"],
            &rows.iter().map(|r| r.iter().map(String::as_str).collect()).collect::<Vec<Vec<&str>>>(),
        );
    }
}

/// Aligned column output; the last column is printed as-is.
fn print_table(header: &[&str], rows: &[Vec<&str>]) {
    let columns = header.len();
    let header_row: Vec<&str> = header.to_vec();
    let mut widths = vec![0usize; columns - 1];
    for row in std::iter::once(&header_row).chain(rows.iter()) {
        for (i, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(row[i].len() + 2);
        }
    }
    for row in std::iter::once(&header_row).chain(rows.iter()) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 < columns {
                line.push_str(&format!("{:<width$}", cell, width = widths[i]));
            } else {
                line.push_str(cell);
            }
        }
        println!("{}", line);
    }
}
