use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Command failed (exit {code:?}): {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Binary not found: {0}")]
    MissingBinary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
