//! Environment variable snapshot.

/// Host of the database server
pub const DB_HOST: &str = "DB_HOST";
/// Database (schema) name
pub const DB_NAME: &str = "DB_NAME";
/// Login user
pub const DB_USER: &str = "DB_USER";
/// Login password
pub const DB_PASS: &str = "DB_PASS";
/// Server port
pub const DB_PORT: &str = "DB_PORT";
/// Directory the snapshot is written to
pub const OUTPUT_DIR: &str = "OUTPUT_DIR";
/// Table name filter
pub const TABLE_NAME_REGEXP: &str = "TABLE_NAME_REGEXP";
/// Version tag recorded in the snapshot
pub const SCHEMA_VERSION: &str = "SCHEMA_VERSION";

/// Values of the recognised environment variables, captured once.
///
/// A variable that is set to the empty string counts as present. Variables
/// that are unset or not valid Unicode are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    pub host: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub port: Option<String>,
    pub output_dir: Option<String>,
    pub table_filter: Option<String>,
    pub schema_version: Option<String>,
}

impl EnvSource {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a snapshot from an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup(DB_HOST),
            database: lookup(DB_NAME),
            user: lookup(DB_USER),
            password: lookup(DB_PASS),
            port: lookup(DB_PORT),
            output_dir: lookup(OUTPUT_DIR),
            table_filter: lookup(TABLE_NAME_REGEXP),
            schema_version: lookup(SCHEMA_VERSION),
        }
    }
}
