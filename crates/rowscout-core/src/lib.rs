//! Rowscout Core Library
//!
//! This crate provides the core functionality for Rowscout, including:
//! - Schema metadata (model descriptors, relationship declarations, registry)
//! - Relationship resolution into normalized join facts
//! - Search condition building (parameterized SQL boolean fragments)
//! - Schema configuration files (TOML)
//! - SQLite execution helpers

pub mod config;
pub mod error;
pub mod exec;
pub mod resolve;
pub mod schema;
pub mod search;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::SchemaConfig;
    pub use crate::error::{Error, Result};
    pub use crate::schema::{ModelDescriptor, RelationshipDecl, RelationshipShape, SchemaRegistry};
    pub use crate::search::{KeywordSet, SearchBuilder, SqlCondition};
}
