use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::search::paginator::PageRequest;

/// Configuration for scanning a delimited file.
///
/// Everything the scan needs besides the query and the page number lives here and
/// is passed in explicitly; nothing is read from process-wide state.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.rowscout.yaml` in the current directory
/// 3. Global `$HOME/.config/rowscout/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Delimited file to search
/// file_path: "exports/customers.csv"
///
/// # Records per page
/// page_size: 1000
///
/// # Field delimiter and quote character (single ASCII characters)
/// delimiter: ","
/// quote: "\""
///
/// # Page links shown on each side of the current page
/// link_radius: 2
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command-line arguments take precedence over config file values; see
/// [`ScanConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Delimited file to search
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Number of records per page
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroUsize,

    /// Field delimiter, a single ASCII character
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Quote character, a single ASCII character
    #[serde(default = "default_quote")]
    pub quote: String,

    /// How many page links to show on each side of the current page
    #[serde(default = "default_link_radius")]
    pub link_radius: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Values supplied on the command line. `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub file_path: Option<PathBuf>,
    pub page_size: Option<NonZeroUsize>,
    pub delimiter: Option<String>,
    pub log_level: Option<String>,
}

fn default_file_path() -> PathBuf {
    PathBuf::from("data.csv")
}

fn default_page_size() -> NonZeroUsize {
    NonZeroUsize::new(1000).unwrap_or(NonZeroUsize::MIN)
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_quote() -> String {
    "\"".to_string()
}

fn default_link_radius() -> usize {
    2
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            page_size: default_page_size(),
            delimiter: default_delimiter(),
            quote: default_quote(),
            link_radius: default_link_radius(),
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Creates a configuration for the given file with all other values defaulted
    pub fn for_file(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default locations plus an explicit file.
    /// The explicit file must exist; the default locations are optional.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            dirs::config_dir().map(|p| p.join("rowscout/config.yaml")),
            Some(PathBuf::from(".rowscout.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(file_path) = cli.file_path {
            self.file_path = file_path;
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }

    /// Checks values the type system cannot
    pub fn validate(&self) -> SearchResult<()> {
        self.delimiter_byte()?;
        self.quote_byte()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> SearchResult<u8> {
        single_ascii_byte("delimiter", &self.delimiter)
    }

    pub fn quote_byte(&self) -> SearchResult<u8> {
        single_ascii_byte("quote", &self.quote)
    }

    /// Builds a page request for this configuration's page size, clamping page 0 to 1
    pub fn page_request(&self, page: usize) -> PageRequest {
        PageRequest::new(page, self.page_size)
    }
}

fn single_ascii_byte(name: &str, value: &str) -> SearchResult<u8> {
    // A literal backslash-t means tab
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(SearchError::config_error(format!(
            "{} must be a single ASCII character, got {:?}",
            name, value
        ))),
    }
}
