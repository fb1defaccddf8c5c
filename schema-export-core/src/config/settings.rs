//! Resolved settings for one export run.

use super::file::{DATABASE_SECTION, EXPORT_SECTION};
use super::{ConfigFile, EnvSource, resolve};
use crate::error::{ExportError, Result};
use crate::filter::MATCH_ALL;
use crate::security::Credentials;
use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;

/// Server host used when nothing else is configured
pub const DEFAULT_HOST: &str = "localhost";
/// MySQL's standard port
pub const DEFAULT_PORT: u16 = 3306;
/// Output directory used when nothing else is configured
pub const DEFAULT_OUTPUT_DIR: &str = "./export";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub output_dir: Option<PathBuf>,
    pub table_filter: Option<String>,
}

/// Fully resolved export settings.
///
/// # Security
/// The password lives inside [`Credentials`]; `Debug` and `Display` never
/// print it.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub credentials: Credentials,
    pub output_dir: PathBuf,
    /// Raw filter pattern, delimiters not yet stripped
    pub table_filter: String,
    pub schema_version: String,
}

impl ExportSettings {
    /// Resolves every setting from the four tiers and validates the result.
    ///
    /// `today` supplies the default schema version (`YYYY-MM-DD`) when
    /// `SCHEMA_VERSION` is not set.
    ///
    /// # Errors
    /// Returns a configuration error when the database name or user is missing
    /// or empty, or when the port is not a number between 1 and 65535.
    pub fn resolve(
        flags: &CliOverrides,
        env: &EnvSource,
        file: &ConfigFile,
        today: NaiveDate,
    ) -> Result<Self> {
        let host = resolve(
            flags.host.clone(),
            env.host.clone(),
            file.value(DATABASE_SECTION, "host"),
            DEFAULT_HOST.to_string(),
        );
        let database = resolve(
            flags.database.clone(),
            env.database.clone(),
            file.value(DATABASE_SECTION, "name"),
            String::new(),
        );
        let user = resolve(
            flags.user.clone(),
            env.user.clone(),
            file.value(DATABASE_SECTION, "user"),
            String::new(),
        );
        let password = resolve(
            flags.password.clone(),
            env.password.clone(),
            file.value(DATABASE_SECTION, "password"),
            String::new(),
        );
        let port = resolve(
            flags.port.map(|p| p.to_string()),
            env.port.clone(),
            file.value(DATABASE_SECTION, "port"),
            DEFAULT_PORT.to_string(),
        );
        let table_filter = resolve(
            flags.table_filter.clone(),
            env.table_filter.clone(),
            file.value(EXPORT_SECTION, "table_filter"),
            MATCH_ALL.to_string(),
        );
        let output_dir = resolve(
            flags.output_dir.clone(),
            env.output_dir.clone().map(PathBuf::from),
            file.value(EXPORT_SECTION, "output_dir").map(PathBuf::from),
            PathBuf::from(DEFAULT_OUTPUT_DIR),
        );
        let schema_version = env
            .schema_version
            .clone()
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());

        if database.is_empty() || user.is_empty() {
            return Err(ExportError::configuration(
                "Database name and user are required.",
            ));
        }

        let port = parse_port(&port)?;

        Ok(Self {
            host,
            port,
            database,
            credentials: Credentials::new(user, password),
            output_dir,
            table_filter,
            schema_version,
        })
    }
}

impl fmt::Display for ExportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.database, self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ExportError::configuration(format!(
            "Invalid port '{}': must be a number between 1 and 65535",
            raw
        ))),
    }
}
