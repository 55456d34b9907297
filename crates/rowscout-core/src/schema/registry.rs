//! Schema registry
//!
//! The registry is the model catalog the resolver and the search builder read
//! from. It is built once at startup, either in code or from a configuration
//! file, and validated before use. Iteration order is deterministic so
//! generated SQL and diagnostics are stable across runs.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

use super::model::ModelDescriptor;
use super::relationship::RelationshipShape;

/// Registry of all searchable models, keyed by model name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    models: BTreeMap<String, ModelDescriptor>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model descriptor
    ///
    /// Rejects duplicate model names and descriptors with empty identifiers.
    pub fn register(&mut self, model: ModelDescriptor) -> Result<()> {
        if model.name.is_empty() {
            return Err(Error::InvalidSchema("model name must not be empty".into()));
        }
        if model.table.is_empty() || model.primary_key.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "model '{}' must declare a table and a primary key",
                model.name
            )));
        }
        if model.searchable.iter().any(String::is_empty) {
            return Err(Error::InvalidSchema(format!(
                "model '{}' declares an empty searchable field name",
                model.name
            )));
        }
        if self.models.contains_key(&model.name) {
            return Err(Error::InvalidSchema(format!(
                "model '{}' is already registered",
                model.name
            )));
        }

        self.models.insert(model.name.clone(), model);
        Ok(())
    }

    /// Look up a model descriptor, failing if it is not registered
    pub fn describe(&self, name: &str) -> Result<&ModelDescriptor> {
        self.get(name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    /// Look up a model descriptor
    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.get(name)
    }

    /// Whether a model is registered
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Iterate over registered models in name order
    pub fn models(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.values()
    }

    /// Validate the registry as a whole
    ///
    /// Checks that every search-associated name is declared, that every
    /// declaration the search will traverse resolves to registered models,
    /// and that the search-associated graph is acyclic.
    pub fn validate(&self) -> Result<()> {
        for model in self.models.values() {
            for name in &model.search_associated {
                let decl =
                    model
                        .association(name)
                        .ok_or_else(|| Error::UnknownAssociation {
                            model: model.name.clone(),
                            association: name.clone(),
                        })?;

                if !self.models.contains_key(&decl.target) {
                    return Err(Error::UnresolvedShape {
                        model: model.name.clone(),
                        association: name.clone(),
                        reason: format!("target model '{}' is not registered", decl.target),
                    });
                }
                if let RelationshipShape::ManyToManyThrough { through, .. } = &decl.shape {
                    if !self.models.contains_key(through) {
                        return Err(Error::UnresolvedShape {
                            model: model.name.clone(),
                            association: name.clone(),
                            reason: format!("through model '{through}' is not registered"),
                        });
                    }
                }
            }
        }

        let mut done = BTreeSet::new();
        for name in self.models.keys() {
            self.walk(name, &mut Vec::new(), &mut done)?;
        }
        Ok(())
    }

    // Depth-first walk over the search-associated graph, rejecting back-edges.
    fn walk(
        &self,
        name: &str,
        path: &mut Vec<String>,
        done: &mut BTreeSet<String>,
    ) -> Result<()> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|entry| entry == name) {
            let mut cycle: Vec<String> = path[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(Error::CyclicAssociation(cycle.join(" -> ")));
        }

        path.push(name.to_string());
        if let Some(model) = self.models.get(name) {
            for assoc_name in &model.search_associated {
                if let Some(decl) = model.association(assoc_name) {
                    self.walk(&decl.target, path, done)?;
                }
            }
        }
        path.pop();
        done.insert(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> ModelDescriptor {
        ModelDescriptor::new("article", "articles")
            .searchable_on(["title", "body"])
            .search_associated(["comments"])
            .has_many("comments", "comment")
    }

    fn comment() -> ModelDescriptor {
        ModelDescriptor::new("comment", "comments").searchable_on(["body"])
    }

    #[test]
    fn test_register_and_describe() {
        let mut registry = SchemaRegistry::new();
        registry.register(article()).unwrap();
        registry.register(comment()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.describe("article").unwrap().table, "articles");
        assert!(matches!(
            registry.describe("author"),
            Err(Error::UnknownModel(_))
        ));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = SchemaRegistry::new();
        registry.register(comment()).unwrap();
        assert!(matches!(
            registry.register(comment()),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_register_rejects_empty_identifiers() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            registry.register(ModelDescriptor::new("", "articles")),
            Err(Error::InvalidSchema(_))
        ));
        assert!(matches!(
            registry.register(ModelDescriptor::new("article", "")),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_validate_accepts_well_formed_schema() {
        let mut registry = SchemaRegistry::new();
        registry.register(article()).unwrap();
        registry.register(comment()).unwrap();
        registry.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_undeclared_search_association() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDescriptor::new("article", "articles")
                    .searchable_on(["title"])
                    .search_associated(["tags"]),
            )
            .unwrap();

        assert!(matches!(
            registry.validate(),
            Err(Error::UnknownAssociation { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_target_model() {
        let mut registry = SchemaRegistry::new();
        registry.register(article()).unwrap();

        match registry.validate() {
            Err(Error::UnresolvedShape { reason, .. }) => {
                assert!(reason.contains("comment"));
            }
            other => panic!("expected UnresolvedShape, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_missing_through_model() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDescriptor::new("article", "articles")
                    .searchable_on(["title"])
                    .search_associated(["stores"])
                    .many_to_many_through("stores", "store", "stocking"),
            )
            .unwrap();
        registry
            .register(ModelDescriptor::new("store", "stores").searchable_on(["name"]))
            .unwrap();

        match registry.validate() {
            Err(Error::UnresolvedShape { reason, .. }) => {
                assert!(reason.contains("stocking"));
            }
            other => panic!("expected UnresolvedShape, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_cycles() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDescriptor::new("article", "articles")
                    .searchable_on(["title"])
                    .search_associated(["comments"])
                    .has_many("comments", "comment"),
            )
            .unwrap();
        registry
            .register(
                ModelDescriptor::new("comment", "comments")
                    .searchable_on(["body"])
                    .search_associated(["article"])
                    .belongs_to("article", "article"),
            )
            .unwrap();

        match registry.validate() {
            Err(Error::CyclicAssociation(path)) => {
                assert!(path.contains("article -> comment -> article") || path.contains("comment -> article -> comment"));
            }
            other => panic!("expected CyclicAssociation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_self_referential_search() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDescriptor::new("employee", "employees")
                    .searchable_on(["name"])
                    .search_associated(["reports"])
                    .has_many("reports", "employee"),
            )
            .unwrap();

        assert!(matches!(
            registry.validate(),
            Err(Error::CyclicAssociation(_))
        ));
    }

    #[test]
    fn test_validate_allows_diamond_shapes() {
        // Two paths reaching the same model is not a cycle.
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ModelDescriptor::new("article", "articles")
                    .searchable_on(["title"])
                    .search_associated(["comments", "author"])
                    .has_many("comments", "comment")
                    .belongs_to("author", "author"),
            )
            .unwrap();
        registry
            .register(
                ModelDescriptor::new("comment", "comments")
                    .searchable_on(["body"])
                    .search_associated(["author"])
                    .belongs_to("author", "author"),
            )
            .unwrap();
        registry
            .register(ModelDescriptor::new("author", "authors").searchable_on(["name"]))
            .unwrap();

        registry.validate().unwrap();
    }
}
