//! Parser configuration.
//!
//! Every field has a default, so a YAML file only needs the keys it
//! changes:
//!
//! ```yaml
//! program: example
//! description: fetch and list items
//! epilogue: "report bugs to the issue tracker"
//! help_column: 30
//! inject_help: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Column at which help text starts in option and command lists.
pub const DEFAULT_HELP_COLUMN: usize = 25;

/// Settings for one [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```
/// use argbind::Config;
///
/// let config = Config::default().with_program("example");
/// assert_eq!(config.program.as_deref(), Some("example"));
/// assert_eq!(config.help_column, 25);
/// assert!(config.inject_help);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program name in usage lines; defaults to the basename of argv[0].
    pub program: Option<String>,
    /// Text printed above the usage line in full help.
    pub description: Option<String>,
    /// Text printed after everything else in full help.
    pub epilogue: Option<String>,
    /// Column at which help text starts.
    pub help_column: usize,
    /// Adds `--help`/`-h` unless a record already declares `--help`.
    pub inject_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: None,
            description: None,
            epilogue: None,
            help_column: DEFAULT_HELP_COLUMN,
            inject_help: true,
        }
    }
}

impl Config {
    /// Sets the program name.
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = Some(program.to_string());
        self
    }

    /// Sets the description printed above the usage line.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the epilogue printed at the end of full help.
    pub fn with_epilogue(mut self, epilogue: &str) -> Self {
        self.epilogue = Some(epilogue.to_string());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
