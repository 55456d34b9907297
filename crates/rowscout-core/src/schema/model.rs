//! Model descriptors
//!
//! A model descriptor is the per-model search configuration: which table the
//! rows live in, which columns are searchable, and which associations also
//! contribute to the model's search results. Descriptors are built once at
//! registration time and never mutated per request.

use serde::{Deserialize, Serialize};

use super::relationship::{RelationshipDecl, RelationshipShape};

fn default_primary_key() -> String {
    "id".to_string()
}

/// Search configuration for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Registry key; also the basis for default foreign-key names
    pub name: String,
    /// Table the model's rows live in
    pub table: String,
    /// Primary key column
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Columns eligible for keyword matching, in declaration order
    #[serde(default)]
    pub searchable: Vec<String>,
    /// Names of associations that also contribute to search results
    #[serde(default)]
    pub search_associated: Vec<String>,
    /// All declared relationships, by name
    #[serde(default)]
    pub associations: Vec<RelationshipDecl>,
}

impl ModelDescriptor {
    /// Create a descriptor with the default `id` primary key
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: default_primary_key(),
            searchable: Vec::new(),
            search_associated: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Override the primary key column
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Declare the searchable columns
    ///
    /// Order is preserved in generated SQL; duplicates are dropped.
    pub fn searchable_on<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.searchable.contains(&field) {
                self.searchable.push(field);
            }
        }
        self
    }

    /// Declare which associations extend this model's search
    pub fn search_associated<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.search_associated.contains(&name) {
                self.search_associated.push(name);
            }
        }
        self
    }

    /// Declare a direct-to-many relationship: the target table holds the
    /// foreign key back to this model
    pub fn has_many(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.declare(RelationshipDecl::new(
            name,
            target,
            RelationshipShape::HasMany { foreign_key: None },
        ))
    }

    /// Declare an inverse relationship: this model's table holds the foreign
    /// key to the target
    pub fn belongs_to(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.declare(RelationshipDecl::new(
            name,
            target,
            RelationshipShape::BelongsTo { foreign_key: None },
        ))
    }

    /// Declare a many-to-many relationship via a bare join table
    pub fn many_to_many(
        self,
        name: impl Into<String>,
        target: impl Into<String>,
        join_table: impl Into<String>,
    ) -> Self {
        self.declare(RelationshipDecl::new(
            name,
            target,
            RelationshipShape::ManyToMany {
                join_table: join_table.into(),
                foreign_key: None,
                association_foreign_key: None,
            },
        ))
    }

    /// Declare a many-to-many relationship through an intermediate model
    pub fn many_to_many_through(
        self,
        name: impl Into<String>,
        target: impl Into<String>,
        through: impl Into<String>,
    ) -> Self {
        self.declare(RelationshipDecl::new(
            name,
            target,
            RelationshipShape::ManyToManyThrough {
                through: through.into(),
                foreign_key: None,
                association_foreign_key: None,
            },
        ))
    }

    /// Declare a relationship from a full declaration
    ///
    /// Escape hatch for foreign-key overrides the shorthand methods do not
    /// expose. A declaration with a duplicate name replaces the earlier one.
    pub fn declare(mut self, decl: RelationshipDecl) -> Self {
        self.associations.retain(|existing| existing.name != decl.name);
        self.associations.push(decl);
        self
    }

    /// Look up a declared relationship by name
    pub fn association(&self, name: &str) -> Option<&RelationshipDecl> {
        self.associations.iter().find(|decl| decl.name == name)
    }
}
