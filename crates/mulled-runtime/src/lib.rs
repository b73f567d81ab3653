//! Runtime glue for the mulled workflow
//!
//! Shell-outs to the container tooling: building singularity images from
//! docker containers, extracting conda environments, creating environments
//! for package sets, and running resolved test specs against the results.

pub mod conda;
pub mod docker;
pub mod error;
pub mod exec;
pub mod report;
pub mod rewrite;
pub mod singularity;

pub use conda::{CondaRuntime, env_name_for};
pub use docker::DockerRuntime;
pub use error::{Result, RuntimeError};
pub use report::{FailedTest, TestError, TestReport};
pub use rewrite::rewrite_command;
pub use singularity::SingularityRuntime;
