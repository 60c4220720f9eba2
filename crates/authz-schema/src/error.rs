//! Error types for authz-schema

use crate::syntax::Span;

/// Result type for authz-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure turning schema text into a model
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Malformed schema syntax. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error at line {line}, column {column}: expected {expected}, found {found}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

/// Well-formed syntax that does not describe a valid schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Resource type `{name}` is defined more than once (first at {first}, again at {duplicate})")]
    DuplicateType {
        name: String,
        first: Span,
        duplicate: Span,
    },

    #[error("Relation `{name}` is defined more than once on `{resource_type}` (at {span})")]
    DuplicateRelation {
        resource_type: String,
        name: String,
        span: Span,
    },

    #[error("Permission `{name}` is defined more than once on `{resource_type}` (at {span})")]
    DuplicatePermission {
        resource_type: String,
        name: String,
        span: Span,
    },

    #[error("`{name}` on `{resource_type}` is declared as both a relation and a permission (at {span})")]
    NameConflict {
        resource_type: String,
        name: String,
        span: Span,
    },

    #[error("Unknown resource type `{name}` referenced from `{referenced_from}` (at {span})")]
    UnknownType {
        name: String,
        referenced_from: String,
        span: Span,
    },

    #[error("`{resource_type}` has no relation or permission `{subrelation}`, referenced from `{referenced_from}` (at {span})")]
    UnknownSubrelation {
        resource_type: String,
        subrelation: String,
        referenced_from: String,
        span: Span,
    },
}

impl ModelError {
    /// Source position the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::DuplicateType { duplicate, .. } => *duplicate,
            Self::DuplicateRelation { span, .. }
            | Self::DuplicatePermission { span, .. }
            | Self::NameConflict { span, .. }
            | Self::UnknownType { span, .. }
            | Self::UnknownSubrelation { span, .. } => *span,
        }
    }
}
