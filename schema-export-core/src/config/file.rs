//! Optional INI config file.
//!
//! ```ini
//! [database]
//! host = db.internal
//! name = shop
//! user = reporter
//! password = secret
//! port = 3306
//!
//! [export]
//! table_filter = /order_.*/
//! output_dir = ./export
//! ```

use ini::{Ini, ParseOption};
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Section holding connection settings
pub const DATABASE_SECTION: &str = "database";
/// Section holding export settings
pub const EXPORT_SECTION: &str = "export";

/// Values are taken literally: backslashes and quotes are part of the value,
/// so regex filters like `^order_\d+` and Windows paths survive intact.
fn literal_values() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Parsed config file; empty when the file is absent or unreadable.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    ini: Ini,
}

impl ConfigFile {
    /// Loads the file at `path`.
    ///
    /// A missing file yields an empty config. A file that cannot be parsed is
    /// reported with a warning and also yields an empty config, so the run can
    /// still proceed on flags and environment variables.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Self::default();
        }

        match Ini::load_from_file_opt(path, literal_values()) {
            Ok(ini) => {
                tracing::debug!("Loaded config file {}", path.display());
                Self { ini }
            }
            Err(e) => {
                tracing::warn!("Could not parse config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses config text.
    ///
    /// # Errors
    /// Returns the parser error for malformed input.
    pub fn parse(text: &str) -> Result<Self, ini::ParseError> {
        Ini::load_from_str_opt(text, literal_values()).map(|ini| Self { ini })
    }

    /// Looks up `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini.section(Some(section)).and_then(|s| s.get(key))
    }

    /// Owned lookup, convenient for feeding the resolver.
    pub fn value(&self, section: &str, key: &str) -> Option<String> {
        self.get(section, key).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
[database]
host = db.internal
name = shop
user = reporter
port = 3310

[export]
table_filter = /order_.*/
output_dir = /tmp/snapshots
";

    #[test]
    fn test_parse_sections() {
        let config = ConfigFile::parse(SAMPLE).unwrap();
        assert_eq!(config.get(DATABASE_SECTION, "host"), Some("db.internal"));
        assert_eq!(config.get(DATABASE_SECTION, "port"), Some("3310"));
        assert_eq!(config.get(DATABASE_SECTION, "password"), None);
        assert_eq!(config.get(EXPORT_SECTION, "table_filter"), Some("/order_.*/"));
        assert_eq!(
            config.value(EXPORT_SECTION, "output_dir"),
            Some("/tmp/snapshots".to_string())
        );
    }

    #[test]
    fn test_missing_section() {
        let config = ConfigFile::parse("[database]\nname = shop\n").unwrap();
        assert_eq!(config.get(EXPORT_SECTION, "output_dir"), None);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join("absent.ini"));
        assert_eq!(config.get(DATABASE_SECTION, "name"), None);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ConfigFile::load(file.path());
        assert_eq!(config.get(DATABASE_SECTION, "user"), Some("reporter"));
    }

    #[test]
    fn test_backslashes_kept_literally() {
        let config = ConfigFile::parse(
            "[database]\npassword = pa\\ss\n\
             [export]\ntable_filter = ^order_\\d+\\.v2\noutput_dir = C:\\exports\\new\n",
        )
        .unwrap();

        assert_eq!(config.get(DATABASE_SECTION, "password"), Some(r"pa\ss"));
        assert_eq!(config.get(EXPORT_SECTION, "table_filter"), Some(r"^order_\d+\.v2"));
        assert_eq!(config.get(EXPORT_SECTION, "output_dir"), Some(r"C:\exports\new"));
    }

    #[test]
    fn test_backslashes_kept_when_loaded_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[export]\ntable_filter = ^order_\\d+\noutput_dir = C:\\exports\\new\n")
            .unwrap();

        let config = ConfigFile::load(file.path());
        assert_eq!(config.get(EXPORT_SECTION, "table_filter"), Some(r"^order_\d+"));
        assert_eq!(config.get(EXPORT_SECTION, "output_dir"), Some(r"C:\exports\new"));
    }

    #[test]
    fn test_quotes_kept_literally() {
        let config = ConfigFile::parse("[database]\npassword = \"quoted\"\n").unwrap();
        assert_eq!(config.get(DATABASE_SECTION, "password"), Some("\"quoted\""));
    }

    #[test]
    fn test_load_unparsable_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[database\nname = shop\n").unwrap();

        let config = ConfigFile::load(file.path());
        assert_eq!(config.get(DATABASE_SECTION, "name"), None);
    }
}
