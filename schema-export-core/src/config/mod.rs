//! Configuration resolution.
//!
//! Every setting is looked up in four tiers, first hit wins:
//! explicit command-line flag, environment variable, config file entry,
//! built-in default.
//!
//! # Module Structure
//! - `env`: snapshot of the recognised environment variables
//! - `file`: optional INI config file with `[database]` and `[export]` sections
//! - `settings`: the resolved, validated settings for one export run

mod env;
mod file;
mod settings;

pub use env::EnvSource;
pub use file::{ConfigFile, DEFAULT_CONFIG_FILE};
pub use settings::{
    CliOverrides, DEFAULT_HOST, DEFAULT_OUTPUT_DIR, DEFAULT_PORT, ExportSettings,
};

/// Returns the first present value in precedence order, or `default`.
///
/// # Example
/// ```rust
/// use schema_export_core::config::resolve;
///
/// assert_eq!(resolve(None, Some("env"), Some("file"), "default"), "env");
/// assert_eq!(resolve(None, None, None, "default"), "default");
/// ```
pub fn resolve<T>(flag: Option<T>, env: Option<T>, file: Option<T>, default: T) -> T {
    resolve_optional(flag, env, file).unwrap_or(default)
}

/// Returns the first present value in precedence order, if any.
pub fn resolve_optional<T>(flag: Option<T>, env: Option<T>, file: Option<T>) -> Option<T> {
    flag.or(env).or(file)
}
