use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading or interpreting specification data
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid sizing '{value}': expected match_parent, fill_parent, wrap_content or a pixel value")]
    InvalidSizing { value: String },

    #[error("Specification document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub fn invalid_sizing(value: impl Into<String>) -> Self {
        Self::InvalidSizing {
            value: value.into(),
        }
    }
}

/// Errors a host environment (or a method registered by it) reports back to the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Unknown object kind '{kind}'")]
    UnknownKind { kind: String },

    #[error("Resource '{name}' not found")]
    ResourceNotFound { name: String },

    #[error("Could not construct '{kind}': {reason}")]
    ConstructionFailed { kind: String, reason: String },

    #[error("Kind '{kind}' cannot hold children")]
    NotAContainer { kind: String },

    #[error("Invalid arguments for {method}: {reason}")]
    InvalidArguments { method: String, reason: String },

    #[error("{method} failed: {reason}")]
    InvocationFailed { method: String, reason: String },
}

impl HostError {
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    pub fn invalid_arguments(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method: method.into(),
            reason: reason.into(),
        }
    }

    pub fn invocation_failed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvocationFailed {
            method: method.into(),
            reason: reason.into(),
        }
    }
}
