//! Dashboard configuration

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use log::LevelFilter;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::table::DEFAULT_PAGE_SIZE;
use crate::table::PaginationState;

/// Configuration shared by every table and date consumer.
///
/// Loaded from a JSON file; keys that are absent take their defaults.
///
/// # Example
///
/// ```
/// use dashboard_lib::config::DashboardConfig;
///
/// let config = DashboardConfig::default()
///     .with_default_page_size(20)
///     .with_page_size_options(vec![20, 50]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows per page for new tables.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Page sizes offered in the page size selector.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<usize>,

    /// Fixed "today" for date variables. Uses the local date when unset.
    pub reference_date: Option<NaiveDate>,

    /// Where the file-backed session store lives. In-memory when unset.
    pub session_file: Option<PathBuf>,

    /// Minimum level written to the log file.
    ///
    /// Default: info
    pub log_level: LevelFilter,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50, 100],
            reference_date: None,
            session_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl DashboardConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DashboardConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Pins "today" to a fixed date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Sets the session file path.
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Sets the log level.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Checks the page size settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_page_size(self.default_page_size)
    }

    /// Checks that `size` is usable and, when options are configured, offered.
    pub fn check_page_size(&self, size: usize) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidPageSize {
                size,
                reason: "page size must be at least 1",
            });
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&size) {
            return Err(ConfigError::InvalidPageSize {
                size,
                reason: "not one of the page size options",
            });
        }
        Ok(())
    }

    /// Initial pagination state for a new table.
    pub fn pagination(&self) -> PaginationState {
        PaginationState::new(0, self.default_page_size)
    }

    /// Initial pagination state using `page_size` when given.
    ///
    /// A requested size must pass [`DashboardConfig::check_page_size`].
    pub fn pagination_for(&self, page_size: Option<usize>) -> Result<PaginationState, ConfigError> {
        match page_size {
            Some(size) => {
                self.check_page_size(size)?;
                Ok(PaginationState::new(0, size))
            }
            None => Ok(self.pagination()),
        }
    }
}
