use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackcheckError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Path error: {0}")]
    PathError(String),
    #[error("Rule table error: {0}")]
    RulesError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
