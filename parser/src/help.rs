//! Usage and help text.
//!
//! Rendering works on a chain of levels, root first. The last level in the
//! chain is the one being described; the named options of the levels above
//! it are listed as global options.

use std::fmt::Write as _;

use argbind_core::{Arity, CommandSpec, OptionSpec};

/// Renders the one-line usage synopsis for the last level of `chain`.
///
/// The line starts with every level's name, so `chain[0].name` is the
/// program name.
pub fn usage_line(chain: &[&CommandSpec]) -> String {
    let mut usage = String::from("Usage:");
    for level in chain {
        usage.push(' ');
        usage.push_str(&level.name);
    }
    let Some(current) = chain.last() else {
        return usage;
    };

    for option in current.named().filter(|o| !o.builtin) {
        let synopsis = if option.is_flag() {
            format!("--{}", option.long)
        } else {
            format!("--{} {}", option.long, option.placeholder)
        };
        if option.required {
            let _ = write!(usage, " {synopsis}");
        } else {
            let _ = write!(usage, " [{synopsis}]");
        }
    }

    for option in current.positionals() {
        let ph = &option.placeholder;
        match (option.arity(), option.required) {
            (Arity::Single, _) => {
                let _ = write!(usage, " {ph}");
            }
            (Arity::Multiple, true) => {
                let _ = write!(usage, " {ph} [{ph} ...]");
            }
            (Arity::Multiple, false) => {
                let _ = write!(usage, " [{ph} [{ph} ...]]");
            }
        }
    }

    if !current.subcommands.is_empty() {
        usage.push_str(" <command> [<args>]");
    }
    usage
}

/// Extra text around the full help listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorations<'c> {
    pub description: Option<&'c str>,
    pub epilogue: Option<&'c str>,
}

/// Renders the full help for the last level of `chain`.
pub fn help_text(chain: &[&CommandSpec], column: usize, extra: Decorations<'_>) -> String {
    let mut out = String::new();
    if let Some(description) = extra.description {
        out.push_str(description);
        out.push('\n');
    }
    out.push_str(&usage_line(chain));
    out.push('\n');

    let Some((current, ancestors)) = chain.split_last() else {
        return out;
    };

    let positionals: Vec<&OptionSpec> = current.positionals().collect();
    if !positionals.is_empty() {
        out.push_str("\nPositional arguments:\n");
        for option in positionals {
            two_columns(&mut out, &option.placeholder, option.help.as_deref(), column);
        }
    }

    let options: Vec<&OptionSpec> = current.named().filter(|o| !o.builtin).collect();
    let globals: Vec<&OptionSpec> = ancestors
        .iter()
        .flat_map(|level| level.named())
        .filter(|o| !o.builtin)
        .collect();
    let builtins: Vec<&OptionSpec> = chain
        .iter()
        .flat_map(|level| level.named())
        .filter(|o| o.builtin)
        .collect();

    if !options.is_empty() || (globals.is_empty() && !builtins.is_empty()) {
        out.push_str("\nOptions:\n");
        for option in &options {
            option_line(&mut out, option, column);
        }
    }
    if !globals.is_empty() {
        out.push_str("\nGlobal options:\n");
        for option in &globals {
            option_line(&mut out, option, column);
        }
    }
    for option in &builtins {
        option_line(&mut out, option, column);
    }

    if !current.subcommands.is_empty() {
        out.push_str("\nCommands:\n");
        for sub in &current.subcommands {
            two_columns(&mut out, &sub.name, sub.help.as_deref(), column);
        }
    }

    if let Some(epilogue) = extra.epilogue {
        out.push('\n');
        out.push_str(epilogue);
        out.push('\n');
    }
    out
}

fn option_line(out: &mut String, option: &OptionSpec, column: usize) {
    let mut left = format!("--{}", option.long);
    if !option.is_flag() {
        let _ = write!(left, " {}", option.placeholder);
    }
    if let Some(short) = option.short {
        let _ = write!(left, ", -{short}");
        if !option.is_flag() {
            let _ = write!(left, " {}", option.placeholder);
        }
    }
    two_columns(out, &left, option.help.as_deref(), column);
}

/// Writes `  left` and, if present, `help` starting at `column`.
///
/// Help moves to its own line when fewer than three spaces would separate it
/// from the left column.
fn two_columns(out: &mut String, left: &str, help: Option<&str>, column: usize) {
    let lhs = format!("  {left}");
    out.push_str(&lhs);
    if let Some(help) = help.filter(|h| !h.is_empty()) {
        let width = lhs.chars().count();
        if width + 2 < column {
            out.push_str(&" ".repeat(column - width));
        } else {
            out.push('\n');
            out.push_str(&" ".repeat(column));
        }
        out.push_str(help);
    }
    out.push('\n');
}
