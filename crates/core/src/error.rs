use thiserror::Error;

use crate::model::{ResourceKind, Role};

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("no {role} elements found for group '{group}'")]
    GroupNotFound { group: String, role: Role },

    #[error("group '{group}': value '{literal}' does not match pattern '{pattern}': {detail}")]
    PatternMismatch {
        group: String,
        pattern: String,
        literal: String,
        detail: String,
    },

    #[error("cannot parse '{literal}' as a number under the configured separators")]
    NumericParse { literal: String },

    #[error("{count} conflicting {kind} definitions satisfy reference '{id}'")]
    AmbiguousResource {
        id: String,
        kind: ResourceKind,
        count: usize,
    },

    #[error("binding cannot be completed: missing {missing}")]
    IncompleteBinding { missing: String },

    #[error("cannot assemble timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("resource must have a name, a URI, or a backing column")]
    InvalidResource,

    #[error("answer does not satisfy the demanded unit: {reason}")]
    AnswerMismatch { reason: String },

    #[error("no cell at column {column}, row {row}")]
    MissingCell { column: usize, row: usize },
}
