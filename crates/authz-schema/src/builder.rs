//! Syntax tree to [`SchemaModel`].

use std::collections::HashMap;

use crate::error::ModelError;
use crate::model::{PermissionDef, RelationDef, ResourceTypeDef, SchemaModel, SubjectConstraint};
use crate::syntax::{Definition, Span, Statement, SyntaxTree};

#[derive(Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Relation,
    Permission,
}

/// Validate `tree` and build the model.
///
/// Name uniqueness is checked while walking definitions in order. References
/// to other types are checked once every definition is known, so a type may be
/// referenced before it is declared.
pub fn build(tree: &SyntaxTree) -> Result<SchemaModel, ModelError> {
    let mut declared: HashMap<&str, Span> = HashMap::new();
    let mut model = SchemaModel::default();

    for definition in &tree.definitions {
        let name = &definition.name;
        if let Some(first) = declared.get(name.name.as_str()) {
            return Err(ModelError::DuplicateType {
                name: name.name.clone(),
                first: *first,
                duplicate: name.span,
            });
        }
        declared.insert(&name.name, name.span);
        model.resource_types.push(build_type(definition)?);
    }

    check_references(tree, &model)?;

    tracing::debug!(
        resource_types = model.resource_types.len(),
        "Built schema model"
    );
    Ok(model)
}

fn build_type(definition: &Definition) -> Result<ResourceTypeDef, ModelError> {
    let type_name = &definition.name.name;
    let mut members: HashMap<&str, MemberKind> = HashMap::new();
    let mut resource = ResourceTypeDef {
        name: type_name.clone(),
        relations: Vec::new(),
        permissions: Vec::new(),
    };

    for statement in &definition.statements {
        let ident = statement.name();
        let kind = match statement {
            Statement::Relation(_) => MemberKind::Relation,
            Statement::Permission(_) => MemberKind::Permission,
        };

        if let Some(existing) = members.get(ident.name.as_str()) {
            let (resource_type, name, span) = (type_name.clone(), ident.name.clone(), ident.span);
            return Err(match (*existing, kind) {
                (MemberKind::Relation, MemberKind::Relation) => ModelError::DuplicateRelation {
                    resource_type,
                    name,
                    span,
                },
                (MemberKind::Permission, MemberKind::Permission) => {
                    ModelError::DuplicatePermission {
                        resource_type,
                        name,
                        span,
                    }
                }
                _ => ModelError::NameConflict {
                    resource_type,
                    name,
                    span,
                },
            });
        }
        members.insert(&ident.name, kind);

        match statement {
            Statement::Relation(relation) => resource.relations.push(RelationDef {
                name: relation.name.name.clone(),
                subject_constraints: relation
                    .subjects
                    .iter()
                    .map(|s| SubjectConstraint {
                        resource_type: s.resource_type.name.clone(),
                        subrelation: s.subrelation.as_ref().map(|sub| sub.name.clone()),
                        wildcard: s.wildcard,
                    })
                    .collect(),
            }),
            Statement::Permission(permission) => resource.permissions.push(PermissionDef {
                name: permission.name.name.clone(),
            }),
        }
    }

    Ok(resource)
}

/// Every subject type must exist, and so must any `#subrelation` on it.
fn check_references(tree: &SyntaxTree, model: &SchemaModel) -> Result<(), ModelError> {
    for definition in &tree.definitions {
        for statement in &definition.statements {
            let Statement::Relation(relation) = statement else {
                continue;
            };
            let referenced_from = format!("{}#{}", definition.name.name, relation.name.name);

            for subject in &relation.subjects {
                let Some(target) = model.get(&subject.resource_type.name) else {
                    return Err(ModelError::UnknownType {
                        name: subject.resource_type.name.clone(),
                        referenced_from,
                        span: subject.resource_type.span,
                    });
                };
                if let Some(sub) = &subject.subrelation
                    && !target.has_member(&sub.name)
                {
                    return Err(ModelError::UnknownSubrelation {
                        resource_type: target.name.clone(),
                        subrelation: sub.name.clone(),
                        referenced_from,
                        span: sub.span,
                    });
                }
            }
        }
    }
    Ok(())
}
