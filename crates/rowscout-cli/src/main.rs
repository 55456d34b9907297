//! Rowscout CLI - keyword search conditions over relational schemas

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rowscout_core::config::SchemaConfig;
use rowscout_core::exec::{self, SearchOptions};
use rowscout_core::schema::SchemaRegistry;
use rowscout_core::search::{KeywordSet, SearchBuilder};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rowscout")]
#[command(author, version, about = "Keyword search conditions over relational schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema file
    Check {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// List models declared in a schema file
    Models {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Print the search condition for a model and keywords
    Sql {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
        /// Model to search
        #[arg(short, long)]
        model: String,
        /// Keywords to match
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Extra condition ANDed in front of the search condition
        #[arg(short, long)]
        conditions: Option<String>,
        /// Print the placeholder form and bind values instead of literal SQL
        #[arg(long)]
        parameterized: bool,
    },

    /// Run a search against a SQLite database
    Search {
        /// Schema file (TOML)
        #[arg(short, long)]
        schema: PathBuf,
        /// SQLite database file
        #[arg(short, long)]
        db: PathBuf,
        /// Model to search
        #[arg(short, long)]
        model: String,
        /// Keywords to match
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Extra condition ANDed in front of the search condition
        #[arg(short, long)]
        conditions: Option<String>,
        /// ORDER BY expression
        #[arg(long)]
        order_by: Option<String>,
        /// Maximum number of ids to return
        #[arg(short, long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rowscout=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { schema } => cmd_check(&schema, cli.format, cli.quiet),

        Commands::Models { schema } => cmd_models(&schema, cli.format),

        Commands::Sql {
            schema,
            model,
            keywords,
            conditions,
            parameterized,
        } => cmd_sql(
            &schema,
            &model,
            &keywords,
            conditions.as_deref(),
            parameterized,
            cli.format,
        ),

        Commands::Search {
            schema,
            db,
            model,
            keywords,
            conditions,
            order_by,
            limit,
        } => {
            let options = SearchOptions {
                conditions,
                order_by,
                limit,
            };
            cmd_search(&schema, &db, &model, &keywords, &options, cli.format, cli.quiet).await
        }
    }
}

fn load_registry(schema: &Path) -> anyhow::Result<SchemaRegistry> {
    Ok(SchemaConfig::load(schema)?.into_registry()?)
}

fn cmd_check(schema: &Path, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let registry = load_registry(schema)?;
    let models = registry.len();
    let associations: usize = registry
        .models()
        .map(|model| model.search_associated.len())
        .sum();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "models": models,
                "search_associations": associations,
            })
        ),
        OutputFormat::Text => {
            if !quiet {
                println!("schema OK: {models} models, {associations} search associations");
            }
        }
    }
    Ok(())
}

fn cmd_models(schema: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let registry = load_registry(schema)?;

    match format {
        OutputFormat::Json => {
            let models: Vec<_> = registry
                .models()
                .map(|model| {
                    serde_json::json!({
                        "name": model.name,
                        "table": model.table,
                        "searchable": model.searchable,
                        "search_associated": model.search_associated,
                    })
                })
                .collect();
            println!("{}", serde_json::json!(models));
        }
        OutputFormat::Text => {
            for model in registry.models() {
                let mut line = format!(
                    "{} ({}) searchable: {}",
                    model.name,
                    model.table,
                    model.searchable.join(", ")
                );
                if !model.search_associated.is_empty() {
                    line.push_str(&format!(
                        " | search associated: {}",
                        model.search_associated.join(", ")
                    ));
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn cmd_sql(
    schema: &Path,
    model: &str,
    keywords: &[String],
    conditions: Option<&str>,
    parameterized: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let registry = load_registry(schema)?;
    let condition = SearchBuilder::new(&registry)
        .condition(model, &KeywordSet::new(keywords.iter().cloned()))?
        .merge(conditions);

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "expr": condition.expr(),
                "binds": condition.binds(),
                "literal": condition.to_literal(),
            })
        ),
        OutputFormat::Text => {
            if parameterized {
                println!("{}", condition.expr());
                for bind in condition.binds() {
                    println!("-- bind: {bind}");
                }
            } else {
                println!("{}", condition.to_literal());
            }
        }
    }
    Ok(())
}

async fn cmd_search(
    schema: &Path,
    db: &Path,
    model: &str,
    keywords: &[String],
    options: &SearchOptions,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(schema)?;
    let pool = exec::connect(db).await?;
    let ids = exec::search_ids(
        &pool,
        &registry,
        model,
        &KeywordSet::new(keywords.iter().cloned()),
        options,
    )
    .await?;
    debug!(db = %db.display(), matches = ids.len(), "search complete");

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!(ids)),
        OutputFormat::Text => {
            if !quiet {
                println!("{} matches", ids.len());
            }
            for id in ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}
