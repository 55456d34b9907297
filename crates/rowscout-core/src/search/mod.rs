//! Search condition building
//!
//! Turns a model's search configuration and a keyword set into one SQL
//! boolean expression: `lower(col) LIKE '%keyword%'` disjunctions over the
//! model's own columns, OR-combined with unioned subqueries for each
//! search-associated relationship.
//!
//! # Usage
//!
//! ```ignore
//! use rowscout_core::search::{KeywordSet, SearchBuilder};
//!
//! let builder = SearchBuilder::new(&registry);
//! let condition = builder.condition("article", &KeywordSet::new(["ruby"]))?;
//! let sql = format!("SELECT * FROM articles WHERE {}", condition.to_literal());
//! ```

pub mod builder;
pub mod fragment;
pub mod keywords;

pub use builder::SearchBuilder;
pub use fragment::SqlCondition;
pub use keywords::KeywordSet;
