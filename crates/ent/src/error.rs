//! Error types for ent construction, merging and serialization.

use thiserror::Error;

use crate::model::ValueType;

/// Broad category of an [`EntError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad arguments to merge/diff.
    InvalidArgument,
    /// Requested backend is not compiled in.
    NotImplemented,
    /// Input could not be parsed, or output could not be written.
    Codec,
    /// Conflicting class registration.
    Registry,
}

impl ErrorKind {
    /// Returns a short stable name for this kind (e.g., "invalid_argument").
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotImplemented => "not_implemented",
            ErrorKind::Codec => "codec",
            ErrorKind::Registry => "registry",
        }
    }
}

/// Error returned by ent operations.
///
/// Construction and loading never fail; unsafe values are dropped instead.
/// Everything here is raised by merge/diff argument checks, the codecs,
/// or the class registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntError {
    // === InvalidArgument ===
    #[error("no ents given to {op}()")]
    NoEnts { op: &'static str },

    #[error("less than {min} ents given to {op}() (found {found})")]
    TooFewEnts {
        op: &'static str,
        min: usize,
        found: usize,
    },

    #[error("all arguments to {op}() must be ents: argument {index} is {found:?}")]
    NotAnEnt {
        op: &'static str,
        index: usize,
        found: ValueType,
    },

    // === NotImplemented ===
    #[error("{feature} support is not available in this build")]
    NotImplemented { feature: &'static str },

    // === Codec ===
    #[error("json: {0}")]
    Json(String),

    #[error("yaml: {0}")]
    Yaml(String),

    #[error("io: {0}")]
    Io(String),

    // === Registry ===
    #[error("ent class {name:?} is already defined differently")]
    ClassConflict { name: String },
}

impl EntError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EntError::NoEnts { .. } | EntError::TooFewEnts { .. } | EntError::NotAnEnt { .. } => {
                ErrorKind::InvalidArgument
            }
            EntError::NotImplemented { .. } => ErrorKind::NotImplemented,
            EntError::Json(_) | EntError::Yaml(_) | EntError::Io(_) => ErrorKind::Codec,
            EntError::ClassConflict { .. } => ErrorKind::Registry,
        }
    }
}

impl From<serde_json::Error> for EntError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            EntError::Io(err.to_string())
        } else {
            EntError::Json(err.to_string())
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for EntError {
    fn from(err: serde_yaml::Error) -> Self {
        EntError::Yaml(err.to_string())
    }
}

impl From<std::io::Error> for EntError {
    fn from(err: std::io::Error) -> Self {
        EntError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_kinds() {
        assert_eq!(EntError::NoEnts { op: "merge" }.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            EntError::TooFewEnts { op: "diff", min: 2, found: 1 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            EntError::NotAnEnt { op: "merge", index: 1, found: ValueType::Int }.kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_messages() {
        let err = EntError::TooFewEnts { op: "diff", min: 2, found: 1 };
        assert_eq!(err.to_string(), "less than 2 ents given to diff() (found 1)");

        let err = EntError::NotImplemented { feature: "yaml" };
        assert_eq!(err.kind().name(), "not_implemented");
        assert!(err.to_string().starts_with("yaml"));
    }

    #[test]
    fn test_from_json_error() {
        let err: EntError = serde_json::from_str::<serde_json::Value>("{1,}")
            .unwrap_err()
            .into();
        assert!(matches!(err, EntError::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Codec);
    }
}
