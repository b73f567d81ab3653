use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mulled")]
#[command(about = "Search, name and test mulled containers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the deterministic name for a package set
    Hash(HashArgs),

    /// Search container and package registries
    Search(SearchArgs),

    /// List containers or environments
    List(ListArgs),

    /// Resolve test specs for containers
    Resolve(ResolveArgs),

    /// Convert docker containers to singularity images
    Convert(ConvertArgs),

    /// Extract conda environments from docker containers
    ExtractEnv(ExtractEnvArgs),

    /// Create a conda environment for a container name or hash
    BuildEnv(BuildEnvArgs),

    /// Smoke-test built containers or environments
    Test(TestArgs),
}

#[derive(Args)]
pub struct HashArgs {
    /// Package targets as name[=version[=build]]
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Query the registry for a pre-existing container under the hash
    #[arg(long)]
    pub check: bool,

    /// Return results as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Destination {
    Quay,
    Conda,
    Singularity,
    Github,
}

#[derive(Args)]
pub struct SearchArgs {
    /// The name of the tool(s) to search for
    #[arg(short, long, required = true, num_args = 1..)]
    pub search: Vec<String>,

    /// Where to search; quay, conda and singularity when not given
    #[arg(short = 'd', long = "destination", num_args = 1.., value_enum)]
    pub destinations: Option<Vec<Destination>>,

    /// Quay organization to search
    #[arg(short, long)]
    pub organization: Option<String>,

    /// Conda channel to search
    #[arg(short, long)]
    pub channel: Option<String>,

    /// Widen matching to repository descriptions
    #[arg(long)]
    pub non_strict: bool,

    /// Return results as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSource {
    Docker,
    Singularity,
    Conda,
}

#[derive(Args)]
pub struct ListArgs {
    /// Source to list
    #[arg(short, long, value_enum)]
    pub source: ListSource,

    /// Exclude containers already built as singularity images
    #[arg(long)]
    pub not_singularity: bool,

    /// Exclude containers already extracted as conda environments
    #[arg(long)]
    pub not_conda: bool,

    /// Directory where conda environments are stored
    #[arg(long)]
    pub conda_dir: Option<PathBuf>,

    /// File with container names to exclude from the listing
    #[arg(short = 'b', long)]
    pub skip_list: Option<PathBuf>,

    /// File to append the list to instead of printing it
    #[arg(short = 'f', long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Containers or packages to resolve tests for
    #[arg(required = true)]
    pub containers: Vec<String>,

    /// Perform a more extensive, but probably slower, search for tests
    #[arg(long)]
    pub deep_search: bool,

    /// Local checkout of the recipes repository
    #[arg(long)]
    pub recipes_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Containers to convert
    pub containers: Vec<String>,

    /// File containing a list of containers, one per line
    #[arg(short = 'l', long)]
    pub container_list: Option<PathBuf>,

    /// Directory where built images are placed
    #[arg(short = 'f', long)]
    pub image_dir: PathBuf,

    /// Build without sudo
    #[arg(long)]
    pub no_sudo: bool,

    /// Run tests after building and write this logfile
    #[arg(short = 't', long)]
    pub test_log: Option<PathBuf>,

    /// Perform a more extensive, but probably slower, search for tests
    #[arg(long)]
    pub deep_search: bool,

    /// Local checkout of the recipes repository
    #[arg(long)]
    pub recipes_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExtractEnvArgs {
    /// Containers to extract environments from
    pub containers: Vec<String>,

    /// File containing a list of containers, one per line
    #[arg(short = 'l', long)]
    pub container_list: Option<PathBuf>,

    /// Directory where extracted environments are placed
    #[arg(short = 'f', long)]
    pub env_dir: PathBuf,

    /// Copy without sudo
    #[arg(long)]
    pub no_sudo: bool,
}

#[derive(Args)]
pub struct BuildEnvArgs {
    /// Container name, package name or mulled hash
    pub container: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Singularity,
    Conda,
}

#[derive(Args)]
pub struct TestArgs {
    /// Containers or environments to test
    pub containers: Vec<String>,

    /// File containing a list of containers, one per line
    #[arg(short = 'l', long)]
    pub container_list: Option<PathBuf>,

    /// Where the tests run
    #[arg(long, value_enum)]
    pub backend: Backend,

    /// Directory with built singularity images (singularity backend)
    #[arg(short = 'f', long)]
    pub image_dir: Option<PathBuf>,

    /// Filename for a log to be written to
    #[arg(short = 'o', long, default_value = "mulled-test.log")]
    pub logfile: PathBuf,

    /// Perform a more extensive, but probably slower, search for tests
    #[arg(long)]
    pub deep_search: bool,

    /// Local checkout of the recipes repository
    #[arg(long)]
    pub recipes_path: Option<PathBuf>,
}
