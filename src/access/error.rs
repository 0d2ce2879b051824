use thiserror::Error;

/// Failure of a typed read through a [`TypedAccessor`](super::TypedAccessor).
///
/// Every variant names the accessor's path label so that errors raised deep
/// inside nested objects can be traced back to their origin.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("{label}: expected an object to wrap, got {found}")]
    InvalidInput { label: String, found: String },

    #[error("{label}: missing required key '{key}' (expected {expected})")]
    MissingKey {
        key: String,
        label: String,
        expected: &'static str,
    },

    #[error("{label}: key '{key}' expected {expected}, got {found}")]
    TypeMismatch {
        key: String,
        label: String,
        expected: &'static str,
        found: String,
    },
}

impl AccessError {
    /// Returns the key the failed read asked for, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            AccessError::InvalidInput { .. } => None,
            AccessError::MissingKey { key, .. } | AccessError::TypeMismatch { key, .. } => {
                Some(key.as_str())
            }
        }
    }

    /// Returns the path label of the accessor that raised the error.
    pub fn label(&self) -> &str {
        match self {
            AccessError::InvalidInput { label, .. }
            | AccessError::MissingKey { label, .. }
            | AccessError::TypeMismatch { label, .. } => label,
        }
    }
}
