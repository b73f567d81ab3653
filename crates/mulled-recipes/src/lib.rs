//! Recipe access and parsing for the mulled workflow
//!
//! This crate contains:
//! - Template rendering for recipe metadata (meta.yaml is templated text)
//! - Test extraction from recipe metadata and companion test scripts
//! - Recipe stores (local checkout or GitHub-backed)
//! - Anaconda package archive download and extraction

pub mod anaconda;
pub mod error;
pub mod meta;
pub mod script;
pub mod store;
pub mod template;

pub use anaconda::AnacondaClient;
pub use error::{RecipeError, Result};
pub use meta::parse_meta_tests;
pub use script::parse_script_tests;
pub use store::{GithubRecipeStore, LocalRecipeStore, RecipeStore};
pub use template::render_template;
