//! Construction-time validation of one parsing level.
//!
//! Catches declarations that would make the command line ambiguous: two
//! options answering to the same name, two subcommands with the same name,
//! and positionals that could never receive a value.
//!
//! # Examples
//!
//! ```
//! use argbind_core::*;
//!
//! let mut level = CommandSpec::new("example");
//! level.options.push(OptionSpec::new("verbose", Shape::Scalar(ScalarKind::Bool)));
//! assert!(validate_level(&level).is_ok());
//!
//! let mut clash = OptionSpec::new("version", Shape::Scalar(ScalarKind::Bool));
//! clash.long = "verbose".into();
//! level.options.push(clash);
//! assert!(matches!(
//!     validate_level(&level),
//!     Err(SchemaError::DuplicateName { .. })
//! ));
//! ```

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::types::{Arity, CommandSpec};

/// Validates the options and direct subcommands of one level.
///
/// Long and short names share one namespace, so a long name `v` collides
/// with a short name `-v` declared on a different option. Nested levels are
/// validated when they are extracted.
pub fn validate_level(level: &CommandSpec) -> Result<(), SchemaError> {
    let mut seen: HashSet<String> = HashSet::new();

    for option in level.named() {
        let mut names = vec![option.long.clone()];
        if let Some(short) = option.short {
            let short = short.to_string();
            if short != option.long {
                names.push(short);
            }
        }
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateName {
                    level: level.name.clone(),
                    name,
                });
            }
        }
    }

    let mut after_sequence = false;
    for option in level.positionals() {
        if after_sequence {
            return Err(SchemaError::PositionalAfterSequence {
                record: level.records.join("+"),
                field: option.field.clone(),
            });
        }
        after_sequence = option.arity() == Arity::Multiple;
    }

    let mut subcommands: HashSet<&str> = HashSet::new();
    for sub in &level.subcommands {
        if !subcommands.insert(sub.name.as_str()) {
            return Err(SchemaError::DuplicateSubcommand {
                level: level.name.clone(),
                name: sub.name.clone(),
            });
        }
    }

    Ok(())
}
