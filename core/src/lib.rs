//! Core types for binding command lines to caller-owned records.
//!
//! This crate holds everything that happens before a single token is read:
//!
//! - [`Args`] and [`Subcommand`] — how a record declares its fields and its
//!   choice of sub-records to a [`Binder`].
//! - [`parse_annotation`] — the comma-separated directive grammar attached
//!   to each field (`-v`, `--name`, `required`, `positional`, `help:...`,
//!   `placeholder:...`, `subcommand[:name]`, `-`).
//! - [`FromArg`] and [`Field`] — the coercion layer turning one token into
//!   a typed scalar and a batch of tokens into a field's value.
//! - [`Level`] — the schema extractor, producing an ordered list of
//!   [`OptionSpec`]s plus writable [`Slot`]s for one parsing level.
//! - [`CommandSpec`] — the descriptor tree consumed by the parser and the
//!   help renderer.
//!
//! Declaration defects are reported as [`SchemaError`] and token coercion
//! failures as [`CoerceError`]. The `argbind` crate builds the token parser
//! and help renderer on top of these types.
//!
//! # Example
//!
//! ```
//! use argbind_core::*;
//!
//! #[derive(Default)]
//! struct Cli {
//!     ids: Vec<i64>,
//!     verbose: bool,
//! }
//!
//! impl Args for Cli {
//!     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
//!         b.field("IDs", "", &mut self.ids);
//!         b.field("verbose", "-v,help:print more", &mut self.verbose);
//!     }
//! }
//!
//! let mut args = Cli::default();
//! let level = Level::extract("example", vec![&mut args]).unwrap();
//! let ids = level.spec.find_option("ids").unwrap();
//! assert_eq!(ids.arity(), Arity::Multiple);
//! assert_eq!(level.spec.find_option("v").unwrap().long, "verbose");
//! ```

mod bind;
mod directive;
mod error;
mod extract;
mod types;
mod validate;
mod value;

pub use bind::{Args, Binder, FieldDecl, Subcommand, VariantDecl, Variants};
pub use directive::{Annotation, Directive, parse_annotation};
pub use error::{DirectiveError, SchemaError};
pub use extract::{Level, Slot};
pub use types::*;
pub use validate::validate_level;
pub use value::{CoerceError, Field, FromArg};
