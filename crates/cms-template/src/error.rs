//! Template layer errors

use thiserror::Error;

use crate::registry::Signature;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid helper name: {0:?}")]
    InvalidName(String),

    #[error("Helper already registered: {0}")]
    Duplicate(String),

    #[error("Helper {name} must be registered as {expected:?}, got {actual:?}")]
    SignatureMismatch { name: String, expected: Signature, actual: Signature },

    #[error("Helper {name} takes {expected}, got {actual} arguments")]
    Arity { name: String, expected: &'static str, actual: usize },

    #[error("Helper {name}: argument {index} must be a string")]
    ArgumentType { name: String, index: usize },

    #[error("Unknown helper: {0}")]
    Unknown(String),

    #[error("Helper {name} failed: {message}")]
    Failed { name: String, message: String },
}

#[derive(Error, Debug)]
pub enum RenderFailure {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Render timed out after {0} ms")]
    Timeout(u64),

    #[error("Render task failed: {0}")]
    Join(String),
}
