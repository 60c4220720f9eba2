//! Schema language parser and canonical model for authz-schema-sync
//!
//! Parsing happens in two stages:
//!
//! 1. [`parse`] turns schema text into a [`SyntaxTree`] that keeps source
//!    positions for every named node.
//! 2. [`build`] validates the tree and produces a [`SchemaModel`]: resource
//!    types with their relation and permission names, in declaration order.
//!
//! [`parse_schema`] runs both stages.
//!
//! ```
//! let model = authz_schema::parse_schema(
//!     "definition user {}\n\ndefinition org {\n    relation admin: user\n    permission administrate = admin\n}\n",
//! )
//! .unwrap();
//!
//! assert_eq!(model.type_names().collect::<Vec<_>>(), ["user", "org"]);
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod parser;
pub mod syntax;

pub use builder::build;
pub use error::{Error, ModelError, ParseError, Result};
pub use model::{PermissionDef, RelationDef, ResourceTypeDef, SchemaModel, SubjectConstraint};
pub use parser::parse;
pub use syntax::{Span, SyntaxTree};

/// Parse and validate schema text in one step.
pub fn parse_schema(text: &str) -> Result<SchemaModel> {
    let tree = parse(text)?;
    Ok(build(&tree)?)
}
