//! Construction-time error types.
//!
//! Everything here describes a defect in a record's declaration rather than
//! bad user input. Errors raised while parsing tokens live in the `argbind`
//! crate.

use thiserror::Error;

/// A malformed annotation directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// Directive is not part of the grammar.
    #[error("unrecognized directive '{0}'")]
    Unknown(String),
    /// Short name is not exactly one character.
    #[error("short arguments must be one character only, got '{0}'")]
    ShortNameLength(String),
    /// `--` with nothing after it.
    #[error("long name cannot be empty")]
    EmptyLongName,
}

/// A record declaration that cannot be turned into a specification.
///
/// Extraction stops at the first error; no partially extracted
/// specification is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field's annotation failed to parse.
    #[error("{record}.{field}: {source}")]
    Directive {
        record: String,
        field: String,
        source: DirectiveError,
    },
    /// A directive that does not apply to this kind of field.
    #[error("{record}.{field}: '{directive}' is not valid here")]
    InvalidDirective {
        record: String,
        field: String,
        directive: String,
    },
    /// Two options of one level share a long or short name.
    #[error("{level}: duplicate option name '{name}'")]
    DuplicateName { level: String, name: String },
    /// Two subcommands of one level share a name.
    #[error("{level}: duplicate subcommand '{name}'")]
    DuplicateSubcommand { level: String, name: String },
    /// A positional follows a positional that absorbs every remaining value.
    #[error("{record}.{field}: positional declared after a multi-value positional")]
    PositionalAfterSequence { record: String, field: String },
    /// A subcommand variant without the `subcommand` directive.
    #[error("{record}.{field}: variant is not marked as a subcommand")]
    NotSubcommand { record: String, field: String },
    /// A declared variant that the record cannot instantiate.
    #[error("{record}.{field}: variant cannot be instantiated")]
    UnknownVariant { record: String, field: String },
    /// A record registered more than one subcommand field.
    #[error("{record}: only one subcommand field is allowed per record")]
    MultipleSubcommandFields { record: String },
    /// A sub-record type contains itself.
    #[error("subcommand cycle detected at path: {0}")]
    SubcommandCycle(String),
}
