//! Field annotation grammar.
//!
//! An annotation is a comma-separated list of directives:
//!
//! | Directive            | Meaning                                      |
//! |----------------------|----------------------------------------------|
//! | `-x`                 | short name (exactly one character)           |
//! | `--name`             | long name override                           |
//! | `required`           | must be supplied                             |
//! | `positional`         | matched by position                          |
//! | `separate`           | one value per occurrence of a repeated option |
//! | `help:text`          | help text                                    |
//! | `placeholder:text`   | value placeholder in usage and help          |
//! | `subcommand[:name]`  | marks a subcommand variant                   |
//! | `-`                  | exclude the field entirely                   |
//!
//! Whitespace around each directive is ignored. Help text cannot contain a
//! comma here; use the `.help()` channel on the declaration instead.

use crate::error::DirectiveError;

/// One parsed annotation directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'s> {
    Short(char),
    Long(&'s str),
    Required,
    Positional,
    Separate,
    Help(&'s str),
    Placeholder(&'s str),
    Subcommand(Option<&'s str>),
}

/// A parsed annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation<'s> {
    /// The field is excluded from parsing.
    Ignored,
    /// Directives in the order they were written.
    Directives(Vec<Directive<'s>>),
}

/// Parses an annotation string.
///
/// # Examples
///
/// ```
/// use argbind_core::{Annotation, Directive, parse_annotation};
///
/// let parsed = parse_annotation("-O,--optim,help:optimization level").unwrap();
/// assert_eq!(
///     parsed,
///     Annotation::Directives(vec![
///         Directive::Short('O'),
///         Directive::Long("optim"),
///         Directive::Help("optimization level"),
///     ])
/// );
/// assert_eq!(parse_annotation("-").unwrap(), Annotation::Ignored);
/// assert!(parse_annotation("-abc").is_err());
/// ```
pub fn parse_annotation(annotation: &str) -> Result<Annotation<'_>, DirectiveError> {
    let annotation = annotation.trim();
    if annotation == "-" {
        return Ok(Annotation::Ignored);
    }
    if annotation.is_empty() {
        return Ok(Annotation::Directives(Vec::new()));
    }

    annotation
        .split(',')
        .map(|raw| parse_directive(raw.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map(Annotation::Directives)
}

fn parse_directive(raw: &str) -> Result<Directive<'_>, DirectiveError> {
    if let Some(long) = raw.strip_prefix("--") {
        if long.is_empty() || long.starts_with('-') {
            return Err(DirectiveError::EmptyLongName);
        }
        return Ok(Directive::Long(long));
    }

    if let Some(short) = raw.strip_prefix('-') {
        let mut chars = short.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' && c != '=' => Ok(Directive::Short(c)),
            _ => Err(DirectiveError::ShortNameLength(raw.to_string())),
        };
    }

    let (key, value) = match raw.split_once(':') {
        Some((key, value)) => (key, Some(value)),
        None => (raw, None),
    };

    match (key, value) {
        ("required", None) => Ok(Directive::Required),
        ("positional", None) => Ok(Directive::Positional),
        ("separate", None) => Ok(Directive::Separate),
        ("help", Some(text)) => Ok(Directive::Help(text)),
        ("placeholder", Some(text)) if !text.is_empty() => Ok(Directive::Placeholder(text)),
        ("subcommand", None) => Ok(Directive::Subcommand(None)),
        ("subcommand", Some(name)) if !name.is_empty() => Ok(Directive::Subcommand(Some(name))),
        _ => Err(DirectiveError::Unknown(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(annotation: &str) -> Vec<Directive<'_>> {
        match parse_annotation(annotation).unwrap() {
            Annotation::Directives(d) => d,
            Annotation::Ignored => panic!("unexpected ignore"),
        }
    }

    #[test]
    fn test_empty_annotation_has_no_directives() {
        assert!(directives("").is_empty());
        assert!(directives("   ").is_empty());
    }

    #[test]
    fn test_bare_flags_and_names() {
        assert_eq!(
            directives("-v, --verbose , required,positional, separate"),
            vec![
                Directive::Short('v'),
                Directive::Long("verbose"),
                Directive::Required,
                Directive::Positional,
                Directive::Separate,
            ]
        );
    }

    #[test]
    fn test_help_keeps_colons_after_the_first() {
        assert_eq!(
            directives("help:format: json or yaml"),
            vec![Directive::Help("format: json or yaml")]
        );
    }

    #[test]
    fn test_subcommand_with_and_without_name() {
        assert_eq!(directives("subcommand"), vec![Directive::Subcommand(None)]);
        assert_eq!(
            directives("subcommand:checkout"),
            vec![Directive::Subcommand(Some("checkout"))]
        );
    }

    #[test]
    fn test_placeholder_requires_text() {
        assert_eq!(
            directives("placeholder:LEVEL"),
            vec![Directive::Placeholder("LEVEL")]
        );
        assert_eq!(
            parse_annotation("placeholder:"),
            Err(DirectiveError::Unknown("placeholder:".into()))
        );
    }

    #[test]
    fn test_short_name_must_be_one_character() {
        assert_eq!(
            parse_annotation("-xy"),
            Err(DirectiveError::ShortNameLength("-xy".into()))
        );
        assert_eq!(
            parse_annotation("-v,-"),
            Err(DirectiveError::ShortNameLength("-".into()))
        );
    }

    #[test]
    fn test_empty_long_name_is_rejected() {
        assert_eq!(parse_annotation("--"), Err(DirectiveError::EmptyLongName));
    }

    #[test]
    fn test_unknown_directive_is_rejected() {
        assert_eq!(
            parse_annotation("required,greedy"),
            Err(DirectiveError::Unknown("greedy".into()))
        );
        assert_eq!(
            parse_annotation("required:yes"),
            Err(DirectiveError::Unknown("required:yes".into()))
        );
        assert_eq!(
            parse_annotation("separate:yes"),
            Err(DirectiveError::Unknown("separate:yes".into()))
        );
    }
}
