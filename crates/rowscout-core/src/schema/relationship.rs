//! Relationship declarations
//!
//! A relationship names another model and carries a shape tag describing how
//! the two tables join. The four shapes are a closed set; every one-hop join
//! in a relational schema falls into one of them, and each needs a different
//! pair of join columns.

use serde::{Deserialize, Serialize};

/// A named relationship from one model to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDecl {
    /// Association name, unique within the owning model
    pub name: String,
    /// Name of the target model in the registry
    pub target: String,
    #[serde(flatten)]
    pub shape: RelationshipShape,
}

impl RelationshipDecl {
    /// Create a new relationship declaration
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        shape: RelationshipShape,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            shape,
        }
    }
}

/// The four supported relationship shapes
///
/// Foreign-key overrides are optional everywhere; when absent, the column
/// name is derived from registered model and association names at resolution
/// time (`<name>_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RelationshipShape {
    /// The target table holds a foreign key back to the owning model
    HasMany {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_key: Option<String>,
    },
    /// The owning model's table holds a foreign key to the target
    BelongsTo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_key: Option<String>,
    },
    /// Many-to-many via a bare join table carrying both foreign keys
    ManyToMany {
        join_table: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        association_foreign_key: Option<String>,
    },
    /// Many-to-many through an intermediate registered model
    ///
    /// The join table is always the intermediate model's own table.
    ManyToManyThrough {
        through: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        foreign_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        association_foreign_key: Option<String>,
    },
}

impl RelationshipShape {
    /// Get the string representation of the shape tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HasMany { .. } => "has_many",
            Self::BelongsTo { .. } => "belongs_to",
            Self::ManyToMany { .. } => "many_to_many",
            Self::ManyToManyThrough { .. } => "many_to_many_through",
        }
    }
}

impl std::fmt::Display for RelationshipShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_tags() {
        assert_eq!(
            RelationshipShape::HasMany { foreign_key: None }.as_str(),
            "has_many"
        );
        assert_eq!(
            RelationshipShape::ManyToMany {
                join_table: "taggings".into(),
                foreign_key: None,
                association_foreign_key: None,
            }
            .as_str(),
            "many_to_many"
        );
        assert_eq!(
            RelationshipShape::ManyToManyThrough {
                through: "stocking".into(),
                foreign_key: None,
                association_foreign_key: None,
            }
            .to_string(),
            "many_to_many_through"
        );
    }

    #[test]
    fn test_decl_toml_round_trip() {
        let decl = RelationshipDecl::new(
            "tags",
            "tag",
            RelationshipShape::ManyToMany {
                join_table: "taggings".into(),
                foreign_key: Some("post_id".into()),
                association_foreign_key: None,
            },
        );

        let rendered = toml::to_string(&decl).unwrap();
        assert!(rendered.contains("shape = \"many_to_many\""));
        assert!(rendered.contains("join_table = \"taggings\""));

        let parsed: RelationshipDecl = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, decl);
    }

    #[test]
    fn test_decl_toml_defaults() {
        let parsed: RelationshipDecl = toml::from_str(
            r#"
            name = "comments"
            target = "comment"
            shape = "has_many"
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.shape,
            RelationshipShape::HasMany { foreign_key: None }
        );
    }
}
