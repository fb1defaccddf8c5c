//! Logging setup for the schema-export binary.

use crate::Result;
use crate::error::ExportError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the command-line verbosity flags onto a tracing level.
///
/// `quiet` wins over any number of `-v` flags.
pub const fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Filter directives for the given flags.
///
/// sqlx logs every statement it runs; those only show up at TRACE.
pub fn directives_for(verbose: u8, quiet: bool) -> String {
    let level = level_for(verbose, quiet);
    let sqlx_level = if level == Level::TRACE {
        Level::TRACE
    } else {
        Level::WARN.min(level)
    };
    format!("{},sqlx={}", level, sqlx_level).to_lowercase()
}

/// Initializes logging to standard output.
///
/// `RUST_LOG`, when set, replaces the directives derived from the flags.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level logs
///
/// # Example
/// ```rust,no_run
/// use schema_export_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives_for(verbose, quiet)).map_err(|e| {
            ExportError::configuration(format!("Invalid log filter: {}", e))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .try_init()
        .map_err(|e| ExportError::configuration(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so only the
    // flag mapping is exercised here.
    #[test]
    fn test_verbosity_levels() {
        let test_cases = [
            ((true, 0), Level::ERROR),
            ((true, 5), Level::ERROR),
            ((false, 0), Level::INFO),
            ((false, 1), Level::DEBUG),
            ((false, 2), Level::TRACE),
            ((false, 10), Level::TRACE),
        ];

        for ((quiet, verbose), expected) in test_cases {
            assert_eq!(
                level_for(verbose, quiet),
                expected,
                "Failed for quiet={}, verbose={}",
                quiet,
                verbose
            );
        }
    }

    #[test]
    fn test_sqlx_statements_hidden_below_trace() {
        assert_eq!(directives_for(0, false), "info,sqlx=warn");
        assert_eq!(directives_for(1, false), "debug,sqlx=warn");
        assert_eq!(directives_for(2, false), "trace,sqlx=trace");
        assert_eq!(directives_for(3, true), "error,sqlx=error");
    }

    #[test]
    fn test_directives_parse() {
        for verbose in 0..3 {
            assert!(EnvFilter::try_new(directives_for(verbose, false)).is_ok());
        }
    }
}
