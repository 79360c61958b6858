//! sqlbind CLI
//!
//! Command-line tool for inspecting how the placeholders of a SQL statement
//! bind to tables and columns.

mod report;
mod source;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlbind_core::{Catalog, Statement, StatementAnalyzer, TypeRegistry};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Placeholder binding analysis for SQL statements.
#[derive(Parser)]
#[command(name = "sqlbind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database URL to read the schema from.
    #[arg(short, long, env = "DATABASE_URL")]
    database: Option<String>,

    /// JSON schema file with table definitions.
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// JSON analyzer configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parameters of a statement.
    Analyze {
        /// The SQL statement.
        sql: String,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Overlay parameter metadata reported by the database driver.
        #[arg(long)]
        describe: bool,
    },

    /// Print a statement with inline names and type hints removed.
    Executable {
        /// The SQL statement.
        sql: String,
    },

    /// List known tables and columns.
    Tables,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::Executable { sql } = &cli.command {
        println!("{}", Statement::new(sql.as_str()).executable_sql());
        return Ok(());
    }

    let config = source::load_config(cli.config.as_deref())?;
    let types = TypeRegistry::with_mappings(&config.additional_type_mappings)?;

    let pool = match &cli.database {
        Some(url) => {
            debug!(url = %url, "Connecting to database");
            Some(
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .connect(url)
                    .await?,
            )
        }
        None => None,
    };
    let catalog = build_catalog(&cli, pool.as_ref(), &types).await?;
    info!(tables = catalog.len(), "Schema loaded");

    match cli.command {
        Commands::Tables => {
            if catalog.is_empty() {
                println!("No tables known. Pass --schema or --database.");
            } else {
                print!("{}", report::render_catalog(&catalog));
            }
        }

        Commands::Analyze {
            sql,
            json,
            describe,
        } => {
            let analyzer = StatementAnalyzer::with_types(catalog, types);
            let mut statement = analyzer.analyze_sql(&sql)?;

            if describe {
                match &pool {
                    Some(pool) => {
                        let applied = sqlbind_sqlite::load_driver_metadata(
                            pool,
                            &mut statement,
                            analyzer.types(),
                        )
                        .await?;
                        if !applied {
                            info!("Driver does not describe parameter types");
                        }
                    }
                    None => warn!("--describe needs a database, skipping driver metadata"),
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&statement)?);
            } else {
                print!("{}", report::render_statement(&statement));
            }
        }

        Commands::Executable { .. } => {}
    }

    Ok(())
}

/// Merges the schema file and the live database schema. Database tables win.
async fn build_catalog(
    cli: &Cli,
    pool: Option<&SqlitePool>,
    types: &TypeRegistry,
) -> anyhow::Result<Catalog> {
    let mut catalog = match &cli.schema {
        Some(path) => Catalog::from_definitions(&source::load_schema(path)?, types),
        None => Catalog::new(),
    };
    if let Some(pool) = pool {
        for table in sqlbind_sqlite::load_catalog(pool, types).await?.tables() {
            catalog.insert(table.clone());
        }
    }
    Ok(catalog)
}
