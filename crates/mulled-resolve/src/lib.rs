//! Test resolution for packages and containers
//!
//! Given a package identity, the resolver walks a fixed priority order of
//! sources until one yields a usable test spec: the exact-version recipe,
//! its companion test script, the unversioned base recipe, the pre-built
//! anaconda archive, and finally (with deep search) every sibling version
//! and archived build of the same package. Any source being unreachable or
//! malformed just advances the chain; an exhausted chain returns an empty
//! spec, which callers record as "untested".

pub mod combinations;

use mulled_config::Config;
use mulled_core::{PackageTarget, TestSpec};
use mulled_recipes::{
    AnacondaClient, GithubRecipeStore, LocalRecipeStore, RecipeStore, parse_meta_tests,
    parse_script_tests,
};
use std::path::Path;

pub use combinations::CombinationsClient;

const META_FILE: &str = "meta.yaml";
const SCRIPT_FILE: &str = "run_test.sh";

pub struct TestResolver {
    store: Box<dyn RecipeStore>,
    anaconda: AnacondaClient,
    combinations: CombinationsClient,
    deep_search: bool,
}

impl TestResolver {
    pub fn new(
        store: Box<dyn RecipeStore>,
        anaconda: AnacondaClient,
        combinations: CombinationsClient,
        deep_search: bool,
    ) -> Self {
        Self {
            store,
            anaconda,
            combinations,
            deep_search,
        }
    }

    /// Build a resolver from configuration. A local recipes checkout wins
    /// over the hosted repository; `recipes_path` overrides the configured
    /// location.
    pub fn from_config(
        config: &Config,
        recipes_path: Option<&Path>,
        deep_search: bool,
    ) -> anyhow::Result<Self> {
        let local = recipes_path
            .map(Path::to_path_buf)
            .or_else(|| config.recipes.local_path.clone());
        let store: Box<dyn RecipeStore> = match local {
            Some(path) => Box::new(LocalRecipeStore::new(path)),
            None => Box::new(GithubRecipeStore::new(
                &config.github.api_url,
                &config.github.raw_url,
                &config.github.recipes_repo,
            )?),
        };
        let anaconda = AnacondaClient::new(
            &config.anaconda.url,
            &config.conda.channel,
            &config.anaconda.platform,
        )?;
        let combinations =
            CombinationsClient::new(&config.github.api_url, &config.github.combinations_repo)?;
        Ok(Self::new(store, anaconda, combinations, deep_search))
    }

    /// Resolve the best-available test spec for a container identifier.
    /// `mulled-v2-…` names resolve through the multi-package combination
    /// listing; anything else is treated as a single package.
    pub async fn resolve_container(&self, container: &str) -> TestSpec {
        if container.starts_with("mulled") {
            return self.resolve_hashed(container).await;
        }
        match PackageTarget::parse_container(container) {
            Ok(target) => self.resolve(&target).await,
            Err(err) => {
                tracing::debug!("unparseable container {}: {}", container, err);
                TestSpec::empty_for(container)
            }
        }
    }

    /// Walk the fallback chain for a single package target.
    pub async fn resolve(&self, target: &PackageTarget) -> TestSpec {
        let container = target.container_id();

        if let Some(version) = &target.version {
            // 1. exact-version recipe metadata
            let meta_path = format!("recipes/{}/{}/{}", target.name, version, META_FILE);
            if let Some(spec) = self.meta_at(&meta_path).await {
                return attributed(spec, &container);
            }
            // 2. exact-version companion script
            let script_path = format!("recipes/{}/{}/{}", target.name, version, SCRIPT_FILE);
            if let Some(spec) = self.script_at(&script_path).await {
                return attributed(spec, &container);
            }
        }

        // 3. unversioned base metadata
        let base_meta = format!("recipes/{}/{}", target.name, META_FILE);
        if let Some(spec) = self.meta_at(&base_meta).await {
            return attributed(spec, &container);
        }
        // 4. unversioned base script
        let base_script = format!("recipes/{}/{}", target.name, SCRIPT_FILE);
        if let Some(spec) = self.script_at(&base_script).await {
            return attributed(spec, &container);
        }

        // 5. pre-built archive for the exact version
        if target.version.is_some() {
            match self.anaconda.fetch_tests(target).await {
                Ok(Some(spec)) => return attributed(spec, &container),
                Ok(None) => {}
                Err(err) => tracing::debug!("archive lookup for {} failed: {}", container, err),
            }
        }

        if self.deep_search {
            // 6. sibling version metadata
            for path in self.version_files(&target.name, META_FILE).await {
                if let Some(spec) = self.meta_at(&path).await {
                    return attributed(spec, &container);
                }
            }
            // 7. sibling version scripts
            for path in self.version_files(&target.name, SCRIPT_FILE).await {
                if let Some(spec) = self.script_at(&path).await {
                    return attributed(spec, &container);
                }
            }
            // 8. every published archive version
            match self.anaconda.list_archive_urls(&target.name).await {
                Ok(urls) => {
                    for url in urls {
                        match self.anaconda.fetch_tests_from_url(&url).await {
                            Ok(Some(spec)) => return attributed(spec, &container),
                            Ok(None) => {}
                            Err(err) => tracing::debug!("archive {} failed: {}", url, err),
                        }
                    }
                }
                Err(err) => {
                    tracing::debug!("archive listing for {} failed: {}", target.name, err)
                }
            }
        }

        // 9. exhausted; the caller records the package as untested
        TestSpec::empty_for(container)
    }

    /// Resolve a `mulled-v2-…` multi-package container by aggregating the
    /// tests of its member packages.
    pub async fn resolve_hashed(&self, container: &str) -> TestSpec {
        let mut merged = TestSpec::empty_for(container);
        let package_hash = container.split(':').next().unwrap_or(container);

        let targets = match self.combinations.lookup(package_hash).await {
            Ok(Some(targets)) => targets,
            Ok(None) => {
                tracing::debug!("{} not present in the combinations listing", container);
                return merged;
            }
            Err(err) => {
                tracing::debug!("combinations lookup for {} failed: {}", container, err);
                return merged;
            }
        };

        for target in targets.iter() {
            let spec = self.resolve(target).await;
            merged.merge(spec);
        }
        merged
    }

    async fn meta_at(&self, rel_path: &str) -> Option<TestSpec> {
        match self.store.read_file(rel_path).await {
            Ok(text) => parse_meta_tests(&text),
            Err(err) => {
                tracing::debug!("skipping {}: {}", rel_path, err);
                None
            }
        }
    }

    async fn script_at(&self, rel_path: &str) -> Option<TestSpec> {
        match self.store.read_file(rel_path).await {
            Ok(text) => parse_script_tests(&text),
            Err(err) => {
                tracing::debug!("skipping {}: {}", rel_path, err);
                None
            }
        }
    }

    async fn version_files(&self, package: &str, filename: &str) -> Vec<String> {
        match self.store.list_version_files(package, filename).await {
            Ok(files) => files,
            Err(err) => {
                tracing::debug!("version listing for {} failed: {}", package, err);
                Vec::new()
            }
        }
    }
}

fn attributed(mut spec: TestSpec, container: &str) -> TestSpec {
    spec.container = container.to_string();
    spec
}
