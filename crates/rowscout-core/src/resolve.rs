//! Relationship resolution
//!
//! Normalizes a relationship declaration into the join facts the search
//! builder needs: which table to query, which column on it points back at the
//! owning model, and which column points at the target. The queryable table
//! is the join table when one exists (join and through shapes) and the
//! target's own table otherwise, which lets the builder treat all four shapes
//! uniformly.
//!
//! Resolution is a pure function of registry metadata; nothing is cached and
//! nothing is mutated.

use crate::error::{Error, Result};
use crate::schema::{ModelDescriptor, RelationshipShape, SchemaRegistry};

/// Join facts for one (model, association) pair
///
/// Valid for the duration of a single condition build; recomputed per call.
#[derive(Debug, Clone)]
pub struct ResolvedAssociation<'a> {
    /// Table queried to discover matching source-model ids
    pub queryable_table: String,
    /// Column on the queryable table referencing the owning model's rows
    pub source_id_column: String,
    /// Column on the queryable table referencing the target model's rows
    pub target_id_column: String,
    /// The target model's table
    pub target_table: String,
    /// The target model's primary key column
    pub target_primary_key: String,
    /// The target model itself, for recursive condition building
    pub target: &'a ModelDescriptor,
}

// Default foreign-key column derived from a registered name.
fn foreign_key_for(name: &str) -> String {
    format!("{name}_id")
}

/// Resolve a declared association into join facts
///
/// Fails with [`Error::UnknownAssociation`] when the name is not declared on
/// the model, and with [`Error::UnresolvedShape`] when the declaration names
/// a target or through model that is not registered.
pub fn resolve<'a>(
    registry: &'a SchemaRegistry,
    model: &ModelDescriptor,
    association: &str,
) -> Result<ResolvedAssociation<'a>> {
    let decl = model
        .association(association)
        .ok_or_else(|| Error::UnknownAssociation {
            model: model.name.clone(),
            association: association.to_string(),
        })?;

    let unresolved = |reason: String| Error::UnresolvedShape {
        model: model.name.clone(),
        association: association.to_string(),
        reason,
    };

    let target = registry
        .get(&decl.target)
        .ok_or_else(|| unresolved(format!("target model '{}' is not registered", decl.target)))?;

    let resolved = match &decl.shape {
        RelationshipShape::HasMany { foreign_key } => ResolvedAssociation {
            queryable_table: target.table.clone(),
            source_id_column: foreign_key
                .clone()
                .unwrap_or_else(|| foreign_key_for(&model.name)),
            target_id_column: target.primary_key.clone(),
            target_table: target.table.clone(),
            target_primary_key: target.primary_key.clone(),
            target,
        },
        RelationshipShape::BelongsTo { foreign_key } => ResolvedAssociation {
            queryable_table: target.table.clone(),
            source_id_column: foreign_key
                .clone()
                .unwrap_or_else(|| foreign_key_for(&decl.name)),
            target_id_column: target.primary_key.clone(),
            target_table: target.table.clone(),
            target_primary_key: target.primary_key.clone(),
            target,
        },
        RelationshipShape::ManyToMany {
            join_table,
            foreign_key,
            association_foreign_key,
        } => ResolvedAssociation {
            queryable_table: join_table.clone(),
            source_id_column: foreign_key
                .clone()
                .unwrap_or_else(|| foreign_key_for(&model.name)),
            target_id_column: association_foreign_key
                .clone()
                .unwrap_or_else(|| foreign_key_for(&decl.target)),
            target_table: target.table.clone(),
            target_primary_key: target.primary_key.clone(),
            target,
        },
        RelationshipShape::ManyToManyThrough {
            through,
            foreign_key,
            association_foreign_key,
        } => {
            let through_model = registry
                .get(through)
                .ok_or_else(|| unresolved(format!("through model '{through}' is not registered")))?;
            ResolvedAssociation {
                queryable_table: through_model.table.clone(),
                source_id_column: foreign_key
                    .clone()
                    .unwrap_or_else(|| foreign_key_for(&model.name)),
                target_id_column: association_foreign_key
                    .clone()
                    .unwrap_or_else(|| foreign_key_for(&decl.target)),
                target_table: target.table.clone(),
                target_primary_key: target.primary_key.clone(),
                target,
            }
        }
    };

    Ok(resolved)
}
