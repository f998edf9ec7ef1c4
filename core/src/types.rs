//! Descriptor types for record-bound command lines.
//!
//! These types describe *what* a command line accepts, independent of the
//! records that will receive the values. They are built once by the schema
//! extractor and consumed by the token parser and the help renderer. All of
//! them serialize with [`serde`], so a resolved specification tree can be
//! exported for external tooling.

use serde::{Deserialize, Serialize};

/// The closed set of scalar kinds a token can be coerced into.
///
/// Integer and float kinds carry the destination's bit width so that help
/// tooling can describe them; range checking itself happens in the
/// destination type's parser.
///
/// # Examples
///
/// ```
/// use argbind_core::{FromArg, ScalarKind};
///
/// assert_eq!(<u8 as FromArg>::kind(), ScalarKind::Uint { bits: 8 });
/// assert_eq!(<bool as FromArg>::kind(), ScalarKind::Bool);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// `true`/`false`; flags of this kind consume no following token.
    Bool,
    /// Signed integer of the given width.
    Int { bits: u32 },
    /// Unsigned integer of the given width.
    Uint { bits: u32 },
    /// Floating point number of the given width.
    Float { bits: u32 },
    /// Exactly one character.
    Char,
    /// Verbatim string.
    String,
    /// Filesystem path.
    Path,
    /// Any type decoded from text through its own parser.
    Text,
}

/// How many values a destination accepts and how they are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One value; a repeated option overwrites.
    Scalar(ScalarKind),
    /// Zero or more values appended in input order.
    Sequence(ScalarKind),
    /// Zero or more `key=value` pairs.
    Mapping { key: ScalarKind, value: ScalarKind },
}

/// Number of values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    Single,
    Multiple,
}

impl Shape {
    /// Returns the arity implied by the shape.
    pub fn arity(&self) -> Arity {
        match self {
            Shape::Scalar(_) => Arity::Single,
            Shape::Sequence(_) | Shape::Mapping { .. } => Arity::Multiple,
        }
    }

    /// Returns `true` for single boolean destinations, which take no value.
    pub fn is_flag(&self) -> bool {
        matches!(self, Shape::Scalar(ScalarKind::Bool))
    }
}

/// Runtime descriptor for one record field's command-line binding.
///
/// # Examples
///
/// ```
/// use argbind_core::{OptionSpec, ScalarKind, Shape};
///
/// let spec = OptionSpec::new("dataset", Shape::Scalar(ScalarKind::String));
/// assert_eq!(spec.long, "dataset");
/// assert_eq!(spec.placeholder, "DATASET");
/// assert!(spec.matches("dataset"));
/// assert!(!spec.positional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Field name as declared on the record.
    pub field: String,
    /// Long name, used as `--long`.
    pub long: String,
    /// Single-character short name, used as `-s`.
    pub short: Option<char>,
    /// Destination shape.
    pub shape: Shape,
    /// Whether the option (or positional) must be supplied.
    pub required: bool,
    /// Matched by position instead of by name.
    pub positional: bool,
    /// Description for help output.
    pub help: Option<String>,
    /// Value placeholder for usage and help output.
    pub placeholder: String,
    /// Each occurrence of a multi-value option takes exactly one value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub separate: bool,
    /// Injected by the parser rather than declared by a record.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub builtin: bool,
}

impl OptionSpec {
    /// Creates a spec whose long name and placeholder derive from `field`.
    ///
    /// The long name is the lower-cased field name with underscores turned
    /// into dashes; the placeholder is the upper-cased long name.
    pub fn new(field: &str, shape: Shape) -> Self {
        let long = default_long_name(field);
        Self {
            field: field.to_string(),
            placeholder: long.to_uppercase(),
            long,
            short: None,
            shape,
            required: false,
            positional: false,
            help: None,
            separate: false,
            builtin: false,
        }
    }

    /// Arity of the destination.
    pub fn arity(&self) -> Arity {
        self.shape.arity()
    }

    /// Returns `true` if the option takes no value on the command line.
    pub fn is_flag(&self) -> bool {
        self.shape.is_flag()
    }

    /// Checks whether `name` (without leading dashes) refers to this option.
    ///
    /// Long and short names share a single namespace, so `-verbose` and
    /// `--v` resolve the same way as `--verbose` and `-v`.
    pub fn matches(&self, name: &str) -> bool {
        if self.positional {
            return false;
        }
        if self.long == name {
            return true;
        }
        let mut chars = name.chars();
        match (self.short, chars.next(), chars.next()) {
            (Some(short), Some(c), None) => short == c,
            _ => false,
        }
    }
}

/// Derives a long name from a field name.
pub fn default_long_name(field: &str) -> String {
    field.to_lowercase().replace('_', "-")
}

/// One parsing level: the top-level command or a subcommand.
///
/// Options are kept in declaration order, which is the order positional
/// values are assigned in. Subcommands form a tree with the same shape as
/// the records' nested choice fields.
///
/// # Examples
///
/// ```
/// use argbind_core::{CommandSpec, OptionSpec, ScalarKind, Shape};
///
/// let mut root = CommandSpec::new("example");
/// root.options.push(OptionSpec::new("verbose", Shape::Scalar(ScalarKind::Bool)));
/// let mut get = CommandSpec::new("get");
/// get.help = Some("fetch an item".into());
/// root.subcommands.push(get);
///
/// assert_eq!(root.subcommand_names(), vec!["get"]);
/// assert!(root.find_option("verbose").is_some());
/// assert!(root.find_subcommand("get").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program name at the root, subcommand name below it.
    pub name: String,
    /// Record type(s) this level was extracted from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<String>,
    /// Description shown in the parent's command list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Options and positionals in declaration order.
    pub options: Vec<OptionSpec>,
    /// Child levels in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSpec>,
}

impl CommandSpec {
    /// Creates an empty level with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Finds a named (non-positional) option by long or short name.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(name))
    }

    /// Finds a direct child level by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    /// Names of the direct child levels, in declaration order.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|s| s.name.as_str()).collect()
    }

    /// Named options in declaration order.
    pub fn named(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| !o.positional)
    }

    /// Positional options in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.positional)
    }

    /// Follows a path of subcommand names from this level.
    ///
    /// Returns every level along the way, starting with `self`, or the first
    /// name that does not resolve.
    pub fn walk<'s, S: AsRef<str>>(
        &'s self,
        path: &[S],
    ) -> Result<Vec<&'s CommandSpec>, String> {
        let mut chain = vec![self];
        let mut current = self;
        for name in path {
            let name = name.as_ref();
            current = current
                .find_subcommand(name)
                .ok_or_else(|| name.to_string())?;
            chain.push(current);
        }
        Ok(chain)
    }

    /// Serializes the specification tree as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_long_name_lowercases_and_dashes() {
        assert_eq!(default_long_name("MaxJobs"), "maxjobs");
        assert_eq!(default_long_name("max_jobs"), "max-jobs");
        assert_eq!(default_long_name("IDs"), "ids");
    }

    #[test]
    fn test_matches_shares_long_and_short_namespace() {
        let mut spec = OptionSpec::new("verbose", Shape::Scalar(ScalarKind::Bool));
        spec.short = Some('v');
        assert!(spec.matches("verbose"));
        assert!(spec.matches("v"));
        assert!(!spec.matches("vv"));
        assert!(!spec.matches(""));
    }

    #[test]
    fn test_positional_never_matches_by_name() {
        let mut spec = OptionSpec::new("input", Shape::Scalar(ScalarKind::String));
        spec.positional = true;
        assert!(!spec.matches("input"));
    }

    #[test]
    fn test_walk_reports_first_unknown_name() {
        let mut root = CommandSpec::new("example");
        let mut top = CommandSpec::new("toplevel");
        top.subcommands.push(CommandSpec::new("nested"));
        root.subcommands.push(top);

        let chain = root.walk(&["toplevel", "nested"]).unwrap();
        let names: Vec<_> = chain.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["example", "toplevel", "nested"]);

        assert_eq!(root.walk(&["toplevel", "bogus"]), Err("bogus".to_string()));
    }

    #[test]
    fn test_to_json_omits_builtin_when_false() {
        let mut root = CommandSpec::new("example");
        root.options
            .push(OptionSpec::new("count", Shape::Scalar(ScalarKind::Int { bits: 32 })));
        let json = root.to_json().unwrap();
        assert!(json.contains("\"long\": \"count\""));
        assert!(!json.contains("builtin"));
        let back: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }
}
