//! Parse command-line tokens straight into caller-owned records.
//!
//! A record implements [`Args`], declaring each field with a short
//! annotation such as `"-v,help:verbosity level"` or `"positional"`. The
//! [`Parser`] extracts a specification from the records, reads the tokens,
//! and writes coerced values into the fields. Subcommands are enums
//! implementing [`Subcommand`], held in an `Option` field that the parser
//! fills in when the subcommand's name appears.
//!
//! The syntax follows GNU conventions: `--name value`, `--name=value`,
//! `-n value`, bare boolean flags, greedy multi-value options, and `--` to
//! end option processing. Usage and help text are rendered from the same
//! specification, and `--help`/`-h` is added unless a record claims it.
//!
//! # Example
//!
//! ```
//! use argbind::{Args, Binder, Outcome};
//!
//! #[derive(Default)]
//! struct Cli {
//!     input: String,
//!     output: Vec<String>,
//!     verbose: bool,
//! }
//!
//! impl Args for Cli {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.field("Input", "positional", &mut self.input);
//!         b.field("Output", "positional", &mut self.output);
//!         b.field("Verbose", "-v", &mut self.verbose)
//!             .help("verbosity level");
//!     }
//! }
//!
//! let mut cli = Cli::default();
//! let outcome = argbind::parse(["-v", "in", "out1", "out2"], &mut cli).unwrap();
//! assert_eq!(outcome, Outcome::Parsed);
//! assert_eq!(cli.input, "in");
//! assert_eq!(cli.output, vec!["out1", "out2"]);
//! assert!(cli.verbose);
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and
//! never installs a subscriber.

mod config;
mod error;
mod help;
mod parser;
mod report;

pub use argbind_core::*;
pub use config::{Config, DEFAULT_HELP_COLUMN};
pub use error::{ConfigError, ParseError, RenderError};
pub use help::{Decorations, help_text, usage_line};
pub use parser::{IntoRecords, Outcome, Parser};
pub use report::{FAILURE_STATUS, HELP_STATUS};

/// Parses `tokens` into `records` with the default configuration.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
///
/// # Panics
///
/// Panics if the records' declarations are invalid. Use [`Parser::new`] to
/// handle a [`SchemaError`] instead.
pub fn parse<'a, I>(tokens: I, records: impl IntoRecords<'a>) -> Result<Outcome, ParseError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut parser = Parser::new(Config::default(), records).unwrap_or_else(|e| panic!("{e}"));
    parser.parse(tokens)
}

/// Parses the process arguments into `records`.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
///
/// # Panics
///
/// Panics if the records' declarations are invalid.
pub fn parse_env<'a>(records: impl IntoRecords<'a>) -> Result<Outcome, ParseError> {
    parse(env_tokens(), records)
}

/// Parses the process arguments into `records`, printing help and exiting
/// with status 0 on `--help`, or printing the error and exiting with status
/// 1 on failure.
///
/// # Panics
///
/// Panics if the records' declarations are invalid.
pub fn parse_or_exit<'a>(records: impl IntoRecords<'a>) {
    let mut parser = Parser::new(Config::default(), records).unwrap_or_else(|e| panic!("{e}"));
    parser.parse_or_exit(env_tokens());
}

fn env_tokens() -> impl Iterator<Item = String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
}
