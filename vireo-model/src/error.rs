use std::fmt::{self, Display};

/// Errors produced by model parsing and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownNodeKind(String),
    UnknownExtraType(String),
    UnknownItemField(String),
    EmptyGroup,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownNodeKind(raw) => {
                write!(f, "unknown node kind: {raw}")
            }
            ModelError::UnknownExtraType(raw) => {
                write!(f, "unknown extra type: {raw}")
            }
            ModelError::UnknownItemField(raw) => {
                write!(f, "unknown item field: {raw}")
            }
            ModelError::EmptyGroup => {
                write!(f, "grouped candidate must have at least one member")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
