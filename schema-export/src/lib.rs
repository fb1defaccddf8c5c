//! Library module for schema-export.
//!
//! Holds the command line definition and the export runner so both the binary
//! and the integration tests drive the same code path.

pub mod output;

use chrono::Local;
use clap::{Args, Parser};
use schema_export_core::{
    CliOverrides, ConfigFile, EnvSource, ExportSettings, MySqlCatalog, Result, TableFilter,
    adapters::mysql::connection_target, collect_export,
};
use std::path::PathBuf;

pub use output::{ExportSummary, output_path, write_export};

/// Printed after a configuration error.
pub const USAGE_HINT: &str = "Run with --help for usage information.";

#[derive(Debug, Parser)]
#[command(name = "schema-export")]
#[command(about = "Export a MySQL schema to a JSON snapshot")]
#[command(version)]
#[command(long_about = "
schema-export - MySQL schema to JSON exporter

Reads the catalog of one MySQL database over a single read-only connection and
writes every base table's columns, keys, indexes, foreign keys, storage
metadata and CREATE TABLE statement to <output>/schema_<database>.json.

Each setting is taken from the first of: command line flag, environment
variable, config file ([database] and [export] sections), built-in default.

ENVIRONMENT:
  DB_HOST, DB_NAME, DB_USER, DB_PASS, DB_PORT
  OUTPUT_DIR, TABLE_NAME_REGEXP, SCHEMA_VERSION

EXAMPLES:
  schema-export --db shop --user reporter
  schema-export --db shop --user reporter --filter '/^order_/' --output ./snapshots
  DB_NAME=shop DB_USER=reporter schema-export --config /etc/schema-export.ini
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Database server host
    #[arg(long, help = "Database server host [default: localhost]")]
    pub host: Option<String>,

    /// Database to export
    #[arg(long, visible_alias = "db", help = "Name of the database to export")]
    pub database: Option<String>,

    /// Database user
    #[arg(long, help = "Database user")]
    pub user: Option<String>,

    /// Database password
    #[arg(long, help = "Database password (prefer DB_PASS to keep it out of shell history)")]
    pub password: Option<String>,

    /// Database server port
    #[arg(long, help = "Database server port [default: 3306]")]
    pub port: Option<u16>,

    /// Output directory
    #[arg(long, value_name = "DIR", help = "Output directory [default: ./export]")]
    pub output: Option<PathBuf>,

    /// Table name filter
    #[arg(
        long,
        value_name = "REGEX",
        help = "Regex matched from the start of each table name, optionally /wrapped/ [default: .*]"
    )]
    pub filter: Option<String>,

    /// Config file path
    #[arg(
        long,
        value_name = "FILE",
        default_value = schema_export_core::config::DEFAULT_CONFIG_FILE,
        help = "INI config file; a missing file is ignored"
    )]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// The values given explicitly on the command line.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            host: self.host.clone(),
            database: self.database.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            port: self.port,
            output_dir: self.output.clone(),
            table_filter: self.filter.clone(),
        }
    }
}

/// Runs one export end to end.
///
/// Configuration and the table filter are validated before connecting, so a
/// configuration error never touches the database or the output directory.
///
/// # Errors
/// Returns the first configuration, connection, collection, or output error.
pub async fn run(cli: &Cli, env: &EnvSource) -> Result<ExportSummary> {
    let file = ConfigFile::load(&cli.config);
    let settings = ExportSettings::resolve(&cli.overrides(), env, &file, Local::now().date_naive())?;
    let filter = TableFilter::new(&settings.table_filter)?;

    tracing::info!("Exporting {} (schema version {})", settings, settings.schema_version);

    let mut catalog = MySqlCatalog::connect(&settings).await?;
    let collected = collect_export(
        &mut catalog,
        &settings.database,
        &settings.schema_version,
        &filter,
    )
    .await;

    if let Err(e) = catalog.close().await {
        tracing::warn!("{}", e);
    }

    let document = collected?;
    let target = connection_target(&settings);
    let secrets = [settings.credentials.password(), target.as_str()];
    write_export(&document, &settings.output_dir, &secrets).await
}
