//! Core domain models and logic for mulled
//!
//! This crate contains:
//! - Domain models (PackageTarget, TargetSet, TestSpec)
//! - The deterministic package-set hash used to name multi-package images
//! - Core error taxonomy

pub mod error;
pub mod hash;
pub mod target;
pub mod testspec;

pub use error::{CoreError, Result};
pub use hash::{MulledHash, compute_hash};
pub use target::{PackageTarget, TargetSet};
pub use testspec::{ImportLanguage, TestSpec};
