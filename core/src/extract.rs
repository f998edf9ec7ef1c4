//! Schema extraction: from record declarations to option specs.
//!
//! A [`Level`] pairs the descriptor of one parsing level with writable
//! slots into the records that declared it. The descriptor of every
//! subcommand below it is extracted eagerly, by instantiating each variant
//! with its default contents, so that help for any level can be rendered
//! and name collisions are reported before a single token is read.

use tracing::debug;

use crate::bind::{Activate, Args, Binder, ChoiceDecl, short_type_name};
use crate::directive::{Annotation, Directive, parse_annotation};
use crate::error::SchemaError;
use crate::types::{Arity, CommandSpec, OptionSpec, default_long_name};
use crate::validate::validate_level;
use crate::value::Field;
use crate::Subcommand;

/// Where a parsed value goes.
pub enum Slot<'a> {
    /// A record field.
    Field(&'a mut dyn Field),
    /// An option owned by the parser itself, such as the implicit help flag.
    Builtin,
}

/// One parsing level bound to caller-owned records.
///
/// `slots[i]` receives the values for `spec.options[i]`.
pub struct Level<'a> {
    pub spec: CommandSpec,
    pub slots: Vec<Slot<'a>>,
    choice: Option<Choice<'a>>,
}

struct Choice<'a> {
    variants: Vec<Variant>,
    activate: Activate<'a>,
}

struct Variant {
    name: String,
    field: &'static str,
    help: Option<String>,
}

impl<'a> Level<'a> {
    /// Extracts the top level from one or more records.
    ///
    /// Options of all records share the level, in the order the records
    /// are given.
    pub fn extract(
        name: &str,
        records: Vec<&'a mut dyn Args>,
    ) -> Result<Self, SchemaError> {
        let mut spec = CommandSpec::new(name);
        let mut slots = Vec::new();
        let mut choice: Option<ChoiceDecl<'a>> = None;

        for record in records {
            let mut binder = Binder::new(record.record_name());
            record.bind(&mut binder);
            let record_name = binder.record.clone();
            spec.records.push(record_name.clone());
            if let Some(decl) = collect(binder, &mut spec.options, &mut slots)? {
                if choice.is_some() {
                    return Err(SchemaError::MultipleSubcommandFields {
                        record: record_name,
                    });
                }
                choice = Some(decl);
            }
        }

        let choice = match choice {
            Some(decl) => {
                let mut stack = vec![decl.type_name];
                let (children, choice) = describe_choice(decl, &mut stack)?;
                spec.subcommands = children;
                Some(choice)
            }
            None => None,
        };

        validate_level(&spec)?;
        debug!(
            level = %spec.name,
            records = spec.records.len(),
            options = spec.options.len(),
            subcommands = spec.subcommands.len(),
            "Extracted option specs"
        );

        Ok(Self { spec, slots, choice })
    }

    /// Returns `true` while a subcommand can still be activated here.
    pub fn accepts_subcommand(&self) -> bool {
        self.choice.is_some()
    }

    /// Adds an option whose value the caller handles itself.
    pub fn push_builtin(&mut self, mut spec: OptionSpec) {
        spec.builtin = true;
        self.spec.options.push(spec);
        self.slots.push(Slot::Builtin);
    }

    /// Activates the subcommand called `name`.
    ///
    /// On a match, the parent record's choice field is set to the chosen
    /// variant and the child level bound to it is returned; the choice can
    /// be activated at most once. Returns `Ok(None)` when `name` is not a
    /// subcommand of this level.
    pub fn activate(&mut self, name: &str) -> Result<Option<Level<'a>>, SchemaError> {
        let position = match &self.choice {
            Some(choice) => choice.variants.iter().position(|v| v.name == name),
            None => None,
        };
        let Some(position) = position else {
            return Ok(None);
        };
        let Some(choice) = self.choice.take() else {
            return Ok(None);
        };

        let field = choice.variants[position].field;
        let Some(binder) = (choice.activate)(field) else {
            return Ok(None);
        };

        let mut spec = self.spec.subcommands[position].clone();
        let mut options = Vec::with_capacity(spec.options.len());
        let mut slots = Vec::with_capacity(spec.options.len());
        let nested = collect(binder, &mut options, &mut slots)?;
        spec.options = options;

        let choice = match nested {
            Some(decl) => Some(Choice {
                variants: variants_of(&decl)?,
                activate: decl.activate,
            }),
            None => None,
        };

        debug!(subcommand = %name, field, "Activated subcommand");
        Ok(Some(Level { spec, slots, choice }))
    }
}

/// Builds the descriptor of one variant of `C` from a default instance.
pub(crate) fn describe_variant<C: Subcommand>(
    field: &str,
    stack: &mut Vec<&'static str>,
) -> Result<CommandSpec, SchemaError> {
    let record = short_type_name(std::any::type_name::<C>());
    let mut instance = C::instantiate(field).ok_or_else(|| SchemaError::UnknownVariant {
        record: record.to_string(),
        field: field.to_string(),
    })?;

    let mut binder = Binder::new(format!("{record}::{field}"));
    instance.bind(&mut binder);

    let mut spec = CommandSpec::new(field);
    spec.records.push(binder.record.clone());
    let mut slots = Vec::new();
    if let Some(decl) = collect(binder, &mut spec.options, &mut slots)? {
        if stack.contains(&decl.type_name) {
            let mut path: Vec<&str> = stack.iter().map(|t| short_type_name(*t)).collect();
            path.push(decl.record);
            return Err(SchemaError::SubcommandCycle(path.join(" ")));
        }
        stack.push(decl.type_name);
        let described = describe_choice(decl, stack);
        stack.pop();
        spec.subcommands = described?.0;
    }

    validate_level(&spec)?;
    Ok(spec)
}

fn describe_choice<'a>(
    decl: ChoiceDecl<'a>,
    stack: &mut Vec<&'static str>,
) -> Result<(Vec<CommandSpec>, Choice<'a>), SchemaError> {
    let variants = variants_of(&decl)?;
    let mut children = Vec::with_capacity(variants.len());
    for variant in &variants {
        let mut child = (decl.describe)(variant.field, stack)?;
        child.name = variant.name.clone();
        child.help = variant.help.clone();
        children.push(child);
    }
    Ok((
        children,
        Choice {
            variants,
            activate: decl.activate,
        },
    ))
}

fn variants_of(decl: &ChoiceDecl<'_>) -> Result<Vec<Variant>, SchemaError> {
    let mut variants = Vec::with_capacity(decl.variants.len());
    for v in &decl.variants {
        let directive_error = |source| SchemaError::Directive {
            record: decl.record.to_string(),
            field: v.field.to_string(),
            source,
        };
        let directives = match parse_annotation(v.annotation).map_err(directive_error)? {
            Annotation::Ignored => continue,
            Annotation::Directives(directives) => directives,
        };

        let mut name = None;
        let mut help = None;
        for directive in directives {
            match directive {
                Directive::Subcommand(explicit) => {
                    name = Some(explicit.map_or_else(|| default_long_name(v.field), String::from));
                }
                Directive::Help(text) => help = Some(text.to_string()),
                other => {
                    return Err(SchemaError::InvalidDirective {
                        record: decl.record.to_string(),
                        field: v.field.to_string(),
                        directive: directive_label(&other),
                    });
                }
            }
        }

        let Some(name) = name else {
            return Err(SchemaError::NotSubcommand {
                record: decl.record.to_string(),
                field: v.field.to_string(),
            });
        };
        variants.push(Variant {
            name,
            field: v.field,
            help: v.help.clone().or(help),
        });
    }
    Ok(variants)
}

/// Turns a binder's field declarations into specs and slots.
///
/// Returns the record's subcommand declaration, if any.
fn collect<'a>(
    binder: Binder<'a>,
    options: &mut Vec<OptionSpec>,
    slots: &mut Vec<Slot<'a>>,
) -> Result<Option<ChoiceDecl<'a>>, SchemaError> {
    let Binder {
        record,
        fields,
        choices,
    } = binder;

    for decl in fields {
        let directives = match parse_annotation(decl.annotation) {
            Ok(Annotation::Ignored) => continue,
            Ok(Annotation::Directives(directives)) => directives,
            Err(source) => {
                return Err(SchemaError::Directive {
                    record,
                    field: decl.name.to_string(),
                    source,
                });
            }
        };

        let mut spec = OptionSpec::new(decl.name, decl.target.shape());
        let mut placeholder = None;
        for directive in directives {
            match directive {
                Directive::Short(c) => spec.short = Some(c),
                Directive::Long(long) => spec.long = long.to_string(),
                Directive::Required => spec.required = true,
                Directive::Positional => spec.positional = true,
                Directive::Separate => spec.separate = true,
                Directive::Help(text) => spec.help = Some(text.to_string()),
                Directive::Placeholder(text) => placeholder = Some(text.to_string()),
                Directive::Subcommand(_) => {
                    return Err(SchemaError::InvalidDirective {
                        record,
                        field: decl.name.to_string(),
                        directive: directive_label(&directive),
                    });
                }
            }
        }

        if spec.positional && spec.short.is_some() {
            return Err(SchemaError::InvalidDirective {
                record,
                field: decl.name.to_string(),
                directive: "positional".to_string(),
            });
        }

        if spec.separate && (spec.positional || spec.arity() != Arity::Multiple) {
            return Err(SchemaError::InvalidDirective {
                record,
                field: decl.name.to_string(),
                directive: "separate".to_string(),
            });
        }

        if decl.help.is_some() {
            spec.help = decl.help;
        }
        spec.placeholder = decl
            .placeholder
            .or(placeholder)
            .unwrap_or_else(|| spec.long.to_uppercase());

        options.push(spec);
        slots.push(Slot::Field(decl.target));
    }

    let mut choices = choices.into_iter();
    let choice = choices.next();
    if choices.next().is_some() {
        return Err(SchemaError::MultipleSubcommandFields { record });
    }
    Ok(choice)
}

fn directive_label(directive: &Directive<'_>) -> String {
    match directive {
        Directive::Short(c) => format!("-{c}"),
        Directive::Long(long) => format!("--{long}"),
        Directive::Required => "required".to_string(),
        Directive::Positional => "positional".to_string(),
        Directive::Separate => "separate".to_string(),
        Directive::Help(_) => "help".to_string(),
        Directive::Placeholder(_) => "placeholder".to_string(),
        Directive::Subcommand(_) => "subcommand".to_string(),
    }
}
