#![forbid(unsafe_code)]

use std::fmt;

/// Failure to build a model (or a node for `add_node`) from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidJson { message: String },
    ExpectedObject { context: &'static str },
    MissingType { context: &'static str },
    UnexpectedType { found: String, context: &'static str },
    UnknownBorderLocation { location: String },
    DuplicateBorder { location: String },
    DuplicateId { id: String },
    MissingLayout,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { message } => write!(f, "invalid layout json: {message}"),
            Self::ExpectedObject { context } => write!(f, "{context} must be a json object"),
            Self::MissingType { context } => write!(f, "{context} has no `type`"),
            Self::UnexpectedType { found, context } => {
                write!(f, "node type `{found}` is not allowed as {context}")
            }
            Self::UnknownBorderLocation { location } => {
                write!(f, "unknown border location `{location}`")
            }
            Self::DuplicateBorder { location } => {
                write!(f, "more than one border at `{location}`")
            }
            Self::DuplicateId { id } => write!(f, "node id `{id}` is used more than once"),
            Self::MissingLayout => write!(f, "model json has no `layout`"),
        }
    }
}

impl std::error::Error for ModelError {}
