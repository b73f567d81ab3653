use mulled_core::{PackageTarget, TargetSet, compute_hash};
use mulled_recipes::{AnacondaClient, LocalRecipeStore};
use mulled_resolve::{CombinationsClient, TestResolver};
use std::path::Path;

// Unreachable endpoints: the chain must swallow the failures and move on.
const DEAD_URL: &str = "http://127.0.0.1:9";

fn write_recipe(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn resolver(root: &Path, deep_search: bool) -> TestResolver {
    TestResolver::new(
        Box::new(LocalRecipeStore::new(root)),
        AnacondaClient::new(DEAD_URL, "bioconda", "linux-64").unwrap(),
        CombinationsClient::new(DEAD_URL, "BioContainers/multi-package-containers").unwrap(),
        deep_search,
    )
}

#[tokio::test]
async fn test_exact_version_metadata_wins() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/samtools/1.3.1/meta.yaml",
        "test:\n  commands:\n    - samtools --help\nrequirements:\n  run:\n    - zlib\n",
    );
    write_recipe(
        dir.path(),
        "recipes/samtools/meta.yaml",
        "test:\n  commands:\n    - echo base\n",
    );

    let target = PackageTarget::versioned("samtools", "1.3.1");
    let spec = resolver(dir.path(), false).resolve(&target).await;
    assert_eq!(spec.commands, ["samtools --help"]);
    assert_eq!(spec.import_lang.invocation(), "python -c");
    assert_eq!(spec.container, "samtools:1.3.1");
}

#[tokio::test]
async fn test_exact_script_beats_base_metadata() {
    let dir = tempfile::tempdir().unwrap();
    // exact-version recipe declares no tests
    write_recipe(
        dir.path(),
        "recipes/samtools/1.3.1/meta.yaml",
        "package:\n  name: samtools\n",
    );
    write_recipe(
        dir.path(),
        "recipes/samtools/1.3.1/run_test.sh",
        "samtools --help\nsamtools view --help\n",
    );
    write_recipe(
        dir.path(),
        "recipes/samtools/meta.yaml",
        "test:\n  commands:\n    - echo base\n",
    );

    let target = PackageTarget::versioned("samtools", "1.3.1");
    let spec = resolver(dir.path(), false).resolve(&target).await;
    assert_eq!(spec.commands, ["samtools --help && samtools view --help"]);
}

#[tokio::test]
async fn test_falls_back_to_base_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/samtools/meta.yaml",
        "test:\n  commands:\n    - samtools --help\n",
    );

    // requested version has no recipe at all
    let target = PackageTarget::versioned("samtools", "9.9.9");
    let spec = resolver(dir.path(), false).resolve(&target).await;
    assert_eq!(spec.commands, ["samtools --help"]);
    assert_eq!(spec.container, "samtools:9.9.9");
}

#[tokio::test]
async fn test_deep_search_finds_sibling_version() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/samtools/1.0/meta.yaml",
        "test:\n  commands:\n    - samtools --help\n",
    );

    let target = PackageTarget::versioned("samtools", "9.9.9");

    // without deep search the sibling version is never consulted
    let spec = resolver(dir.path(), false).resolve(&target).await;
    assert!(!spec.is_found());

    let spec = resolver(dir.path(), true).resolve(&target).await;
    assert_eq!(spec.commands, ["samtools --help"]);
}

#[tokio::test]
async fn test_exhausted_chain_returns_empty_spec() {
    let dir = tempfile::tempdir().unwrap();
    let target = PackageTarget::new("nonexistent-package-xyz");
    let spec = resolver(dir.path(), true).resolve(&target).await;
    assert!(!spec.is_found());
    assert!(spec.commands.is_empty());
    assert!(spec.imports.is_empty());
    assert_eq!(spec.container, "nonexistent-package-xyz");
}

#[tokio::test]
async fn test_perl_requirement_carries_through() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/perl-bioperl/1.6.924/meta.yaml",
        "test:\n  imports:\n    - Bio::SeqIO\nrequirements:\n  run:\n    - perl >=5.22\n",
    );

    let target = PackageTarget::versioned("perl-bioperl", "1.6.924");
    let spec = resolver(dir.path(), false).resolve(&target).await;
    assert_eq!(spec.imports, ["Bio::SeqIO"]);
    assert_eq!(spec.import_lang.invocation(), "perl -e");
}

#[tokio::test]
async fn test_hash_then_resolve_composition() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/bamtools/2.4.0/meta.yaml",
        "test:\n  commands:\n    - bamtools --help\n",
    );
    write_recipe(
        dir.path(),
        "recipes/samtools/1.3.1/meta.yaml",
        "test:\n  commands:\n    - samtools --help\n",
    );

    let set = TargetSet::from_specs(["bamtools=2.4.0", "samtools=1.3.1"]).unwrap();
    let hash = compute_hash(&set).unwrap();
    assert_eq!(
        hash.package_hash,
        "mulled-v2-0560a8046fc82aa4338588eca29ff18edab2c5aa"
    );

    // a hashed container aggregates the member packages' tests
    let resolver = resolver(dir.path(), false);
    let mut merged = mulled_core::TestSpec::empty_for(hash.image_name());
    for target in set.sorted() {
        merged.merge(resolver.resolve(target).await);
    }
    assert_eq!(merged.commands, ["bamtools --help", "samtools --help"]);
}

#[tokio::test]
async fn test_resolve_container_parses_identifier() {
    let dir = tempfile::tempdir().unwrap();
    write_recipe(
        dir.path(),
        "recipes/samtools/1.3.1/meta.yaml",
        "test:\n  commands:\n    - samtools --help\n",
    );

    let spec = resolver(dir.path(), false)
        .resolve_container("samtools:1.3.1--py35_0")
        .await;
    assert_eq!(spec.commands, ["samtools --help"]);
    assert_eq!(spec.container, "samtools:1.3.1--py35_0");
}

#[tokio::test]
async fn test_unregistered_hash_resolves_empty() {
    let dir = tempfile::tempdir().unwrap();
    let spec = resolver(dir.path(), false)
        .resolve_container("mulled-v2-0560a8046fc82aa4338588eca29ff18edab2c5aa")
        .await;
    assert!(!spec.is_found());
}
