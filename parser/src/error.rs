//! Error types for parsing, rendering, and configuration.

use argbind_core::{CoerceError, SchemaError};
use thiserror::Error;

/// A command line that does not match the specification.
///
/// The parser stops at the first error. Fields assigned before the error
/// keep their new values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option name that no active level declares.
    #[error("unknown argument {0}")]
    UnknownArgument(String),

    /// A value-taking option at the end of input or before another option.
    #[error("missing value for {0}")]
    MissingValue(String),

    /// A value that failed to coerce into the destination type.
    #[error("error processing {option}: {source}")]
    InvalidValue { option: String, source: CoerceError },

    /// More positional values than positional fields can take.
    #[error("too many positional arguments at '{0}'")]
    TooManyPositionals(String),

    /// A required option (`--name`) or positional (`name`) was not supplied.
    #[error("{0} is required")]
    Required(String),

    /// A positional that is not a subcommand, at a level without
    /// positionals.
    #[error("invalid subcommand: {0}")]
    InvalidSubcommand(String),

    /// A subcommand record failed to bind after activation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failure while rendering usage or help text.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A name in the requested subcommand path does not exist.
    #[error("invalid subcommand: {0}")]
    UnknownSubcommand(String),

    /// The sink rejected the write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while loading or saving a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
