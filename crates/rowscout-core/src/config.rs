//! Schema configuration files
//!
//! Schemas are described in TOML and loaded at startup. A document is a list
//! of `[[model]]` tables, each carrying the model's search configuration and
//! relationship declarations:
//!
//! ```toml
//! [[model]]
//! name = "article"
//! table = "articles"
//! searchable = ["title", "body"]
//! search_associated = ["tags"]
//!
//! [[model.associations]]
//! name = "tags"
//! target = "tag"
//! shape = "many_to_many"
//! join_table = "taggings"
//!
//! [[model]]
//! name = "tag"
//! table = "tags"
//! searchable = ["name"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{ModelDescriptor, SchemaRegistry};

/// A schema document: the full set of searchable models
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default, rename = "model")]
    pub models: Vec<ModelDescriptor>,
}

impl SchemaConfig {
    /// Parse a schema document from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| Error::Config(format!("failed to parse schema: {e}")))
    }

    /// Load a schema document from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read schema file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Serialize back to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize schema: {e}")))
    }

    /// Build and validate a registry from this document
    pub fn into_registry(self) -> Result<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();
        for model in self.models {
            registry.register(model)?;
        }
        registry.validate()?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{KeywordSet, SearchBuilder};

    const BLOG_SCHEMA: &str = r#"
        [[model]]
        name = "article"
        table = "articles"
        searchable = ["title", "body"]
        search_associated = ["comments", "tags"]

        [[model.associations]]
        name = "comments"
        target = "comment"
        shape = "has_many"

        [[model.associations]]
        name = "tags"
        target = "tag"
        shape = "many_to_many"
        join_table = "taggings"

        [[model]]
        name = "comment"
        table = "comments"
        searchable = ["body"]

        [[model]]
        name = "tag"
        table = "tags"
        searchable = ["name"]
    "#;

    #[test]
    fn test_parse_and_build_registry() {
        let config = SchemaConfig::from_toml_str(BLOG_SCHEMA).unwrap();
        assert_eq!(config.models.len(), 3);

        let registry = config.into_registry().unwrap();
        let article = registry.describe("article").unwrap();
        assert_eq!(article.searchable, vec!["title", "body"]);
        assert_eq!(article.search_associated, vec!["comments", "tags"]);
    }

    #[test]
    fn test_config_built_registry_matches_code_built_registry() {
        let from_config = SchemaConfig::from_toml_str(BLOG_SCHEMA)
            .unwrap()
            .into_registry()
            .unwrap();

        let mut from_code = SchemaRegistry::new();
        from_code
            .register(
                ModelDescriptor::new("article", "articles")
                    .searchable_on(["title", "body"])
                    .search_associated(["comments", "tags"])
                    .has_many("comments", "comment")
                    .many_to_many("tags", "tag", "taggings"),
            )
            .unwrap();
        from_code
            .register(ModelDescriptor::new("comment", "comments").searchable_on(["body"]))
            .unwrap();
        from_code
            .register(ModelDescriptor::new("tag", "tags").searchable_on(["name"]))
            .unwrap();

        let keywords = KeywordSet::new(["ruby"]);
        let sql_config = SearchBuilder::new(&from_config)
            .condition("article", &keywords)
            .unwrap();
        let sql_code = SearchBuilder::new(&from_code)
            .condition("article", &keywords)
            .unwrap();
        assert_eq!(sql_config, sql_code);
    }

    #[test]
    fn test_round_trip() {
        let config = SchemaConfig::from_toml_str(BLOG_SCHEMA).unwrap();
        let rendered = config.to_toml_string().unwrap();
        let reparsed = SchemaConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(reparsed.models, config.models);
    }

    #[test]
    fn test_parse_error_is_a_config_error() {
        let result = SchemaConfig::from_toml_str("[[model]]\nname = 3");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_schema_is_rejected_on_registry_build() {
        // Association declared for search but missing from associations.
        let config = SchemaConfig::from_toml_str(
            r#"
            [[model]]
            name = "article"
            table = "articles"
            searchable = ["title"]
            search_associated = ["tags"]
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.into_registry(),
            Err(Error::UnknownAssociation { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        fs::write(&path, BLOG_SCHEMA).unwrap();

        let config = SchemaConfig::load(&path).unwrap();
        assert_eq!(config.models.len(), 3);

        let missing = SchemaConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(Error::Config(_))));
    }
}
