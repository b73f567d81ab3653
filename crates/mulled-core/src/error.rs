use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate package in target set: {0}")]
    DuplicatePackage(String),

    #[error("Target set mixes versioned and unversioned packages")]
    MixedVersions,

    #[error("Target set is empty")]
    EmptyTargetSet,

    #[error("Invalid package target: {0}")]
    InvalidTarget(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
