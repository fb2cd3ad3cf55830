//! CLI entry point for kada

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kada_codegen::{GenerationReport, KadaConfig, OutputFormat, TypeMap};
use kada_db::{ConnectionProvider, SchemaConnection};

#[derive(Parser)]
#[command(name = "kada")]
#[command(about = "Generate Java POJOs, MyBatis mappers and Hibernate mappings from a database schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format, `kada.toml` if present otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL (overrides config)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Path to SQL schema file, used instead of a live database (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output format: java, mybatis or hibernate (overrides config)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Java package of the generated classes (overrides config)
    #[arg(short, long)]
    package: Option<String>,

    /// Output root directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output encoding (overrides config)
    #[arg(long)]
    charset: Option<String>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every table
    Generate,
    /// Generate a single table
    Table {
        /// Table name as it appears in the database
        name: String,
    },
    /// Inspect schema (show scanned tables and resolved Java types)
    Inspect,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = KadaConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides; a source given on the command line replaces the other kind
    if let Some(url) = cli.database_url {
        config.database_url = Some(url);
        config.schema_file = None;
    }
    if let Some(schema) = cli.schema {
        config.schema_file = Some(schema);
        config.database_url = None;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(package) = cli.package {
        config.package_name = package;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(charset) = cli.charset {
        config.charset = charset;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    config.validate()?;

    let report = match &cli.command {
        Some(Commands::Inspect) => return inspect_schema(&config).await,
        Some(Commands::Table { name }) => kada_codegen::generate_table(&config, name).await?,
        Some(Commands::Generate) | None => kada_codegen::generate(&config).await?,
    };

    print_report(&report, config.dry_run);

    if !report.is_success() {
        bail!("{} table(s) failed to generate", report.failures.len());
    }
    info!("Code generation completed successfully");
    Ok(())
}

fn print_report(report: &GenerationReport, dry_run: bool) {
    if dry_run {
        println!("Dry run mode - would generate:");
    }
    for path in &report.written {
        println!("  {}", path.display());
    }
    for failure in &report.failures {
        error!(table = %failure.table, "{}", failure.error);
    }
}

async fn inspect_schema(config: &KadaConfig) -> Result<()> {
    let provider = kada_codegen::connection_provider(config)?;
    let mut conn = provider.connect().await?;

    let outcome = print_tables(conn.as_mut()).await;
    conn.close().await?;
    outcome
}

async fn print_tables(conn: &mut dyn SchemaConnection) -> Result<()> {
    let tables = conn.list_tables().await?;
    println!("Scanned {} tables:\n", tables.len());

    for table in &tables {
        match &table.comment {
            Some(comment) => println!("Table: {} ({})", table.name, comment),
            None => println!("Table: {}", table.name),
        }
        println!("  Columns:");
        for col in conn.list_columns(&table.name).await? {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let key = if col.primary_key { " PRIMARY KEY" } else { "" };
            let java_type = TypeMap::resolve(&col.db_type)
                .map(|t| t.qualified_name().to_string())
                .unwrap_or_else(|_| "<unsupported>".to_string());
            println!(
                "    - {} {} {}{} -> {}",
                col.name, col.db_type, nullable, key, java_type
            );
        }
        println!();
    }

    Ok(())
}
