//! Executing search conditions against SQLite
//!
//! A thin execution layer: build the condition, merge any caller-supplied
//! extra condition, and run `SELECT <table>.<pk> FROM <table> WHERE ...`
//! with properly bound parameters. Transactions, pooling policy, and
//! timeouts stay with the caller.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::debug;

use crate::error::Result;
use crate::schema::SchemaRegistry;
use crate::search::{KeywordSet, SearchBuilder};

/// Default maximum connections in the pool
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Optional clauses applied around a built search condition
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Extra raw condition ANDed in front of the search condition
    ///
    /// Embedded verbatim; sanitizing it is the caller's responsibility.
    pub conditions: Option<String>,
    /// ORDER BY expression appended verbatim
    pub order_by: Option<String>,
    /// Maximum number of rows returned
    pub limit: Option<i64>,
}

/// Open a pooled connection to a SQLite database file
pub async fn connect(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let options =
        SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.as_ref().display()))?
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    Ok(pool)
}

/// Open an in-memory database (useful for testing)
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    // In-memory databases live and die with their connection; hold exactly
    // one and never recycle it.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    Ok(pool)
}

/// Search a model for keywords, returning matching primary keys
pub async fn search_ids(
    pool: &SqlitePool,
    registry: &SchemaRegistry,
    model: &str,
    keywords: &KeywordSet,
    options: &SearchOptions,
) -> Result<Vec<i64>> {
    let descriptor = registry.describe(model)?;
    let condition = SearchBuilder::new(registry)
        .condition(model, keywords)?
        .merge(options.conditions.as_deref());

    let mut sql = format!(
        "SELECT {table}.{pk} FROM {table} WHERE {condition}",
        table = descriptor.table,
        pk = descriptor.primary_key,
        condition = condition.expr(),
    );
    if let Some(order_by) = &options.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }
    if let Some(limit) = options.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for bind in condition.binds() {
        query = query.bind(bind.as_str());
    }

    let ids = query.fetch_all(pool).await?;
    debug!(model, matches = ids.len(), "search executed");
    Ok(ids)
}
