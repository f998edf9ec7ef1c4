//! Assignment of buffered positional values to positional fields.

use argbind_core::{Arity, Level, Slot};
use tracing::trace;

use crate::error::ParseError;

/// Assigns `values` to the positional fields of `level`, in declaration
/// order.
///
/// A sequence positional takes every remaining value. Values left over
/// once all positional fields are filled are an error.
pub(crate) fn assign(level: &mut Level<'_>, values: &[String]) -> Result<(), ParseError> {
    let mut rest = values;

    for (spec, slot) in level.spec.options.iter().zip(level.slots.iter_mut()) {
        if !spec.positional {
            continue;
        }
        let taken = match spec.arity() {
            Arity::Multiple => std::mem::take(&mut rest),
            Arity::Single => match rest.split_first() {
                Some((first, tail)) => {
                    rest = tail;
                    std::slice::from_ref(first)
                }
                None => &[],
            },
        };
        if taken.is_empty() {
            if spec.required {
                return Err(ParseError::Required(spec.long.clone()));
            }
            continue;
        }

        trace!(positional = %spec.long, values = ?taken, "Assigning positional");
        let Slot::Field(field) = slot else {
            continue;
        };
        let refs: Vec<&str> = taken.iter().map(String::as_str).collect();
        field
            .assign(&refs)
            .map_err(|source| ParseError::InvalidValue {
                option: spec.long.clone(),
                source,
            })?;
    }

    match rest.first() {
        Some(extra) => Err(ParseError::TooManyPositionals(extra.clone())),
        None => Ok(()),
    }
}
