//! Schema metadata
//!
//! Static, startup-built descriptions of the searchable models and the
//! relationships between them. Everything here is plain data: table names,
//! column names, and shape tags supplied by configuration, never derived
//! from runtime reflection.
//!
//! # Architecture
//!
//! - `model`: per-model search configuration (table, primary key, fields)
//! - `relationship`: named relationship declarations and their four shapes
//! - `registry`: the model catalog, with registration-time validation

pub mod model;
pub mod registry;
pub mod relationship;

pub use model::ModelDescriptor;
pub use registry::SchemaRegistry;
pub use relationship::{RelationshipDecl, RelationshipShape};
