//! Registry search and listing for the mulled workflow
//!
//! This crate contains:
//! - Quay repository search, tag listing and package-hash presence checks
//! - Conda channel search (shelling out to the conda binary)
//! - GitHub code search and recipe-presence probes
//! - Singularity depot index scraping
//! - Missing-container/environment set difference

pub mod conda;
pub mod depot;
pub mod error;
pub mod github;
pub mod listing;
pub mod quay;

pub use conda::{CondaChannel, CondaPackage};
pub use depot::SingularityDepot;
pub use error::{RegistryError, Result};
pub use github::{CodeHit, GithubSearch};
pub use listing::{conda_env_names, missing_containers, missing_envs, read_skip_list};
pub use quay::{HashStatus, QuayRegistry, SearchHit};
