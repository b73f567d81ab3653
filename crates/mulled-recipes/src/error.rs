use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe file not found: {0}")]
    NotFound(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecipeError>;
