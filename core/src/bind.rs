//! Record binding: how records describe their fields.
//!
//! A record implements [`Args`] by handing each field to a [`Binder`]
//! together with its annotation. Subcommand choices are Rust enums that
//! implement [`Subcommand`] and are held in an `Option` field of the parent
//! record; exactly one variant becomes `Some` when its name is parsed.
//!
//! # Example
//!
//! ```
//! use argbind_core::{Args, Binder, Subcommand, Variants};
//!
//! #[derive(Debug, Default)]
//! struct Get {
//!     item: String,
//! }
//!
//! impl Args for Get {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.field("item", "positional", &mut self.item).help("item to fetch");
//!     }
//! }
//!
//! #[derive(Debug)]
//! enum Command {
//!     Get(Get),
//! }
//!
//! impl Subcommand for Command {
//!     fn variants(v: &mut Variants) {
//!         v.variant("get", "subcommand").help("fetch an item and print it");
//!     }
//!
//!     fn instantiate(field: &str) -> Option<Self> {
//!         match field {
//!             "get" => Some(Command::Get(Get::default())),
//!             _ => None,
//!         }
//!     }
//!
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         match self {
//!             Command::Get(get) => get.bind(b),
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Cli {
//!     verbose: bool,
//!     command: Option<Command>,
//! }
//!
//! impl Args for Cli {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.field("verbose", "-v", &mut self.verbose);
//!         b.subcommands(&mut self.command);
//!     }
//! }
//! ```

use std::any::type_name;

use crate::error::SchemaError;
use crate::extract::describe_variant;
use crate::types::CommandSpec;
use crate::value::Field;

/// A record whose fields can be populated from the command line.
pub trait Args {
    /// Registers every field with `binder`, in declaration order.
    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>);

    /// Name used for this record in schema errors.
    fn record_name(&self) -> &'static str {
        short_type_name(type_name::<Self>())
    }
}

/// A discriminated choice of sub-records, one per subcommand.
pub trait Subcommand: Sized {
    /// Declares the variants in order, each with a field name and an
    /// annotation containing `subcommand` or `subcommand:<name>`.
    fn variants(variants: &mut Variants);

    /// Creates the variant declared under `field` with its default contents.
    fn instantiate(field: &str) -> Option<Self>;

    /// Registers the fields of the active variant.
    fn bind<'a>(&'a mut self, binder: &mut Binder<'a>);
}

/// Collects field declarations from one record.
pub struct Binder<'a> {
    pub(crate) record: String,
    pub(crate) fields: Vec<FieldDecl<'a>>,
    pub(crate) choices: Vec<ChoiceDecl<'a>>,
}

/// One declared field: name, annotation, and destination.
pub struct FieldDecl<'a> {
    pub(crate) name: &'static str,
    pub(crate) annotation: &'static str,
    pub(crate) help: Option<String>,
    pub(crate) placeholder: Option<String>,
    pub(crate) target: &'a mut dyn Field,
}

pub(crate) type Activate<'a> = Box<dyn FnOnce(&str) -> Option<Binder<'a>> + 'a>;
pub(crate) type Describe = fn(&str, &mut Vec<&'static str>) -> Result<CommandSpec, SchemaError>;

/// A registered subcommand field.
pub(crate) struct ChoiceDecl<'a> {
    pub(crate) record: &'static str,
    pub(crate) type_name: &'static str,
    pub(crate) variants: Vec<VariantDecl>,
    pub(crate) describe: Describe,
    pub(crate) activate: Activate<'a>,
}

/// Variant declarations of a [`Subcommand`] type.
#[derive(Debug, Default)]
pub struct Variants {
    pub(crate) decls: Vec<VariantDecl>,
}

/// One declared subcommand variant.
#[derive(Debug, Clone)]
pub struct VariantDecl {
    pub(crate) field: &'static str,
    pub(crate) annotation: &'static str,
    pub(crate) help: Option<String>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            fields: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Declares a field.
    ///
    /// `name` is the field's name as written in the record; the default long
    /// name is derived from it. `annotation` is a comma-separated directive
    /// list, see [`parse_annotation`](crate::parse_annotation).
    pub fn field(
        &mut self,
        name: &'static str,
        annotation: &'static str,
        target: &'a mut dyn Field,
    ) -> &mut FieldDecl<'a> {
        let index = self.fields.len();
        self.fields.push(FieldDecl {
            name,
            annotation,
            help: None,
            placeholder: None,
            target,
        });
        &mut self.fields[index]
    }

    /// Declares the record's subcommand field.
    pub fn subcommands<C: Subcommand + 'a>(&mut self, target: &'a mut Option<C>) {
        let mut variants = Variants::default();
        C::variants(&mut variants);
        let record = short_type_name(type_name::<C>());

        let activate: Activate<'a> = Box::new(move |field: &str| {
            *target = Some(C::instantiate(field)?);
            match target {
                Some(choice) => {
                    let mut binder = Binder::new(format!("{record}::{field}"));
                    choice.bind(&mut binder);
                    Some(binder)
                }
                None => None,
            }
        });

        self.choices.push(ChoiceDecl {
            record,
            type_name: type_name::<C>(),
            variants: variants.decls,
            describe: describe_variant::<C>,
            activate,
        });
    }
}

impl FieldDecl<'_> {
    /// Sets help text; takes precedence over a `help:` directive.
    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help = Some(text.into());
        self
    }

    /// Sets the value placeholder; takes precedence over a `placeholder:`
    /// directive.
    pub fn placeholder(&mut self, text: impl Into<String>) -> &mut Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Variants {
    /// Declares a variant under its field name.
    pub fn variant(&mut self, field: &'static str, annotation: &'static str) -> &mut VariantDecl {
        let index = self.decls.len();
        self.decls.push(VariantDecl {
            field,
            annotation,
            help: None,
        });
        &mut self.decls[index]
    }
}

impl VariantDecl {
    /// Sets the text shown next to the subcommand in command lists.
    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help = Some(text.into());
        self
    }
}

/// Strips the module path and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
