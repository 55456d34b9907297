//! The search condition builder
//!
//! Composes the direct-field clause with one unioned subquery per
//! search-associated relationship, recursing into related models. The
//! recursion carries the path of visited models; a relationship cycle fails
//! with [`Error::CyclicAssociation`] instead of exhausting the stack.

use tracing::debug;

use crate::error::{Error, Result};
use crate::resolve;
use crate::schema::{ModelDescriptor, SchemaRegistry};

use super::fragment::SqlCondition;
use super::keywords::KeywordSet;

/// Builds keyword-search conditions against a schema registry
pub struct SearchBuilder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> SearchBuilder<'r> {
    /// Create a builder over a registry
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Build the boolean search condition for a model and keyword set
    ///
    /// An empty keyword set yields the always-false condition, never
    /// malformed SQL.
    pub fn condition(&self, model: &str, keywords: &KeywordSet) -> Result<SqlCondition> {
        let descriptor = self.registry.describe(model)?;
        let mut path = vec![descriptor.name.clone()];
        let condition = self.condition_for(descriptor, keywords, &mut path)?;
        debug!(model, keywords = keywords.len(), "search condition built");
        Ok(condition)
    }

    fn condition_for(
        &self,
        model: &ModelDescriptor,
        keywords: &KeywordSet,
        path: &mut Vec<String>,
    ) -> Result<SqlCondition> {
        if keywords.is_empty() {
            return Ok(SqlCondition::match_none());
        }

        let mut binds = Vec::new();

        // Direct-field predicates, field-major so declaration order drives
        // the emitted SQL.
        let mut predicates = Vec::new();
        for field in &model.searchable {
            for pattern in keywords.patterns() {
                predicates.push(format!("lower({}.{}) LIKE ?", model.table, field));
                binds.push(pattern);
            }
        }
        let direct = (!predicates.is_empty()).then(|| predicates.join(" OR "));

        // One UNION arm per search-associated relationship. Each arm selects
        // the owning model's ids from the queryable table, filtered by the
        // target ids that match the recursively built inner condition.
        let mut arms = Vec::new();
        for name in &model.search_associated {
            let assoc = resolve::resolve(self.registry, model, name)?;
            if path.contains(&assoc.target.name) {
                let mut cycle = path.clone();
                cycle.push(assoc.target.name.clone());
                return Err(Error::CyclicAssociation(cycle.join(" -> ")));
            }

            path.push(assoc.target.name.clone());
            let inner = self.condition_for(assoc.target, keywords, path)?;
            path.pop();
            let (inner_expr, inner_binds) = inner.into_parts();

            let subquery = format!(
                "SELECT {target_table}.{target_pk} FROM {target_table} WHERE ({inner_expr})",
                target_table = assoc.target_table,
                target_pk = assoc.target_primary_key,
            );
            arms.push(format!(
                "SELECT {queryable}.{source_id} FROM {queryable} WHERE ({queryable}.{target_id} IN ({subquery}))",
                queryable = assoc.queryable_table,
                source_id = assoc.source_id_column,
                target_id = assoc.target_id_column,
            ));
            binds.extend(inner_binds);
        }

        let includes = (!arms.is_empty()).then(|| {
            format!(
                "{}.{} IN ({})",
                model.table,
                model.primary_key,
                arms.join(" UNION ")
            )
        });

        let expr = match (direct, includes) {
            (Some(direct), Some(includes)) => format!("({direct}) OR ({includes})"),
            (Some(direct), None) => direct,
            (None, Some(includes)) => includes,
            (None, None) => return Ok(SqlCondition::match_none()),
        };
        Ok(SqlCondition::new(expr, binds))
    }
}
