//! Canonical, language-neutral schema model.
//!
//! Flat records in declaration order. Serialized as-is into template contexts,
//! so field names here are what templates see.

use std::fmt;

use serde::Serialize;

/// All resource types of one schema, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaModel {
    pub resource_types: Vec<ResourceTypeDef>,
}

impl SchemaModel {
    pub fn get(&self, name: &str) -> Option<&ResourceTypeDef> {
        self.resource_types.iter().find(|t| t.name == name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.resource_types.iter().map(|t| t.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTypeDef {
    pub name: String,
    pub relations: Vec<RelationDef>,
    pub permissions: Vec<PermissionDef>,
}

impl ResourceTypeDef {
    pub fn relation(&self, name: &str) -> Option<&RelationDef> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn permission(&self, name: &str) -> Option<&PermissionDef> {
        self.permissions.iter().find(|p| p.name == name)
    }

    /// Whether `name` is a relation or permission on this type.
    pub fn has_member(&self, name: &str) -> bool {
        self.relation(name).is_some() || self.permission(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationDef {
    pub name: String,
    /// Alternatives in source order, never repeated.
    pub subject_constraints: Vec<SubjectConstraint>,
}

/// One allowed subject of a relation: `user`, `group#member` or `user:*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubjectConstraint {
    pub resource_type: String,
    pub subrelation: Option<String>,
    pub wildcard: bool,
}

impl SubjectConstraint {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            subrelation: None,
            wildcard: false,
        }
    }

    pub fn with_subrelation(resource_type: impl Into<String>, subrelation: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            subrelation: Some(subrelation.into()),
            wildcard: false,
        }
    }

    pub fn wildcard(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            subrelation: None,
            wildcard: true,
        }
    }
}

impl fmt::Display for SubjectConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_type)?;
        if let Some(sub) = &self.subrelation {
            write!(f, "#{sub}")?;
        }
        if self.wildcard {
            f.write_str(":*")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionDef {
    pub name: String,
}
