//! Concrete syntax tree produced by the parser.
//!
//! Every name carries the [`Span`] where it appeared so later validation can
//! point back into the source.

use std::fmt;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A name and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub definitions: Vec<Definition>,
}

/// `definition <name> { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: Ident,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Relation(RelationStmt),
    Permission(PermissionStmt),
}

impl Statement {
    pub fn name(&self) -> &Ident {
        match self {
            Self::Relation(r) => &r.name,
            Self::Permission(p) => &p.name,
        }
    }
}

/// `relation <name>: <subject> | <subject> ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationStmt {
    pub name: Ident,
    pub subjects: Vec<SubjectRef>,
}

/// One alternative on the right of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRef {
    pub resource_type: Ident,
    pub subrelation: Option<Ident>,
    pub wildcard: bool,
}

impl SubjectRef {
    /// Whether two references name the same subject, ignoring positions.
    pub fn same_subject(&self, other: &SubjectRef) -> bool {
        self.resource_type.name == other.resource_type.name
            && self.subrelation.as_ref().map(|s| &s.name) == other.subrelation.as_ref().map(|s| &s.name)
            && self.wildcard == other.wildcard
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_type.name)?;
        if let Some(sub) = &self.subrelation {
            write!(f, "#{}", sub.name)?;
        }
        if self.wildcard {
            f.write_str(":*")?;
        }
        Ok(())
    }
}

/// `permission <name> = <expression>`
///
/// The expression is kept as raw text and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStmt {
    pub name: Ident,
    pub expression: String,
}
