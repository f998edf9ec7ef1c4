//! The token parser.
//!
//! A [`Parser`] owns a stack of frames, one per active level: the root and
//! every subcommand activated so far. Option names resolve from the
//! innermost frame outward, so options of a parent level stay usable after
//! a subcommand and a child's name shadows its parent's. Positionals only
//! ever go to the innermost level.

mod positional;
mod tokens;

use std::io::Write;
use std::path::Path;

use argbind_core::{
    Args, Arity, CommandSpec, FromArg, Level, OptionSpec, ScalarKind, SchemaError, Shape, Slot,
};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ParseError, RenderError};
use crate::help::{self, Decorations};
use tokens::{Token, Tokens};

const HELP_TEXT: &str = "display this help and exit";

/// The result of a successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Every token was consumed and every required value is present.
    Parsed,
    /// `--help` or `-h` was given. Positionals were left unassigned and
    /// required checks were skipped.
    Help,
}

/// Records a parser writes into.
///
/// Implemented for a single record, a tuple of two or three records, and a
/// `Vec` of trait objects. All records share the top level.
pub trait IntoRecords<'a> {
    fn into_records(self) -> Vec<&'a mut dyn Args>;
}

impl<'a, T: Args> IntoRecords<'a> for &'a mut T {
    fn into_records(self) -> Vec<&'a mut dyn Args> {
        vec![self]
    }
}

impl<'a> IntoRecords<'a> for Vec<&'a mut dyn Args> {
    fn into_records(self) -> Vec<&'a mut dyn Args> {
        self
    }
}

impl<'a, A: Args, B: Args> IntoRecords<'a> for (&'a mut A, &'a mut B) {
    fn into_records(self) -> Vec<&'a mut dyn Args> {
        vec![self.0, self.1]
    }
}

impl<'a, A: Args, B: Args, C: Args> IntoRecords<'a> for (&'a mut A, &'a mut B, &'a mut C) {
    fn into_records(self) -> Vec<&'a mut dyn Args> {
        vec![self.0, self.1, self.2]
    }
}

struct Frame<'a> {
    level: Level<'a>,
    /// Set for each option seen on the command line.
    present: Vec<bool>,
}

impl<'a> Frame<'a> {
    fn new(level: Level<'a>) -> Self {
        let present = vec![false; level.spec.options.len()];
        Self { level, present }
    }
}

/// Parses tokens into records bound at construction.
///
/// # Examples
///
/// ```
/// use argbind::{Args, Binder, Config, Outcome, Parser};
///
/// #[derive(Default)]
/// struct Cli {
///     foo: String,
///     bar: bool,
/// }
///
/// impl Args for Cli {
///     fn bind<'a>(&'a mut self, b: &mut Binder<'a>) {
///         b.field("Foo", "", &mut self.foo);
///         b.field("Bar", "", &mut self.bar);
///     }
/// }
///
/// let mut cli = Cli::default();
/// let mut parser = Parser::new(Config::default().with_program("example"), &mut cli).unwrap();
/// assert_eq!(parser.parse(["--foo=hello", "--bar"]).unwrap(), Outcome::Parsed);
/// drop(parser);
/// assert_eq!(cli.foo, "hello");
/// assert!(cli.bar);
/// ```
pub struct Parser<'a> {
    config: Config,
    frames: Vec<Frame<'a>>,
    help_requested: bool,
}

impl<'a> Parser<'a> {
    /// Extracts and validates the specification of `records`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for any declaration defect, anywhere in the
    /// subcommand tree.
    pub fn new(config: Config, records: impl IntoRecords<'a>) -> Result<Self, SchemaError> {
        let program = config.program.clone().unwrap_or_else(program_from_env);
        let mut root = Level::extract(&program, records.into_records())?;

        if config.inject_help && root.spec.find_option("help").is_none() {
            let mut help = OptionSpec::new("help", Shape::Scalar(ScalarKind::Bool));
            help.help = Some(HELP_TEXT.to_string());
            if root.spec.find_option("h").is_none() {
                help.short = Some('h');
            }
            root.push_builtin(help);
        }

        Ok(Self {
            config,
            frames: vec![Frame::new(root)],
            help_requested: false,
        })
    }

    /// The resolved specification tree, rooted at the program.
    pub fn spec(&self) -> &CommandSpec {
        &self.frames[0].level.spec
    }

    /// Names of the subcommands activated so far, outermost first.
    pub fn subcommand_path(&self) -> Vec<&str> {
        self.frames[1..]
            .iter()
            .map(|f| f.level.spec.name.as_str())
            .collect()
    }

    /// Parses `tokens`, not including the program name.
    ///
    /// Values are written into the bound records as they are read, so a
    /// failed parse may leave some fields assigned. A parser is meant to
    /// parse one command line.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse<I>(&mut self, tokens: I) -> Result<Outcome, ParseError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tokens = Tokens::new(tokens.into_iter().map(Into::into).collect());
        let mut positionals: Vec<String> = Vec::new();

        while let Some(token) = tokens.next_token() {
            match token {
                Token::Positional {
                    value,
                    after_separator,
                } => self.positional(value, after_separator, &mut positionals)?,
                Token::Option { raw, name, inline } => {
                    self.option(&raw, &name, inline, &mut tokens)?;
                }
            }
        }

        if self.help_requested {
            debug!(path = ?self.subcommand_path(), "Help requested");
            return Ok(Outcome::Help);
        }

        let innermost = self.frames.len() - 1;
        for (depth, frame) in self.frames.iter_mut().enumerate() {
            let values: &[String] = if depth == innermost { &positionals } else { &[] };
            positional::assign(&mut frame.level, values)?;
        }
        self.check_required()?;
        Ok(Outcome::Parsed)
    }

    fn positional(
        &mut self,
        value: String,
        after_separator: bool,
        buffer: &mut Vec<String>,
    ) -> Result<(), ParseError> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };
        if !after_separator && buffer.is_empty() && frame.level.accepts_subcommand() {
            if let Some(child) = frame.level.activate(&value)? {
                debug!(subcommand = %value, depth = self.frames.len(), "Entered subcommand");
                self.frames.push(Frame::new(child));
                return Ok(());
            }
            if frame.level.spec.positionals().next().is_none() {
                return Err(ParseError::InvalidSubcommand(value));
            }
        }
        buffer.push(value);
        Ok(())
    }

    fn option(
        &mut self,
        raw: &str,
        name: &str,
        inline: Option<String>,
        tokens: &mut Tokens,
    ) -> Result<(), ParseError> {
        let (depth, index) = self
            .resolve(name)
            .ok_or_else(|| ParseError::UnknownArgument(raw.to_string()))?;
        let frame = &mut self.frames[depth];
        frame.present[index] = true;
        let spec = &frame.level.spec.options[index];

        let values = match (spec.arity(), inline) {
            (_, Some(value)) => vec![value],
            (Arity::Multiple, None) if !spec.separate => tokens.take_values(),
            (Arity::Single, None) if spec.is_flag() => vec!["true".to_string()],
            (_, None) => {
                let value = tokens
                    .next_value()
                    .ok_or_else(|| ParseError::MissingValue(raw.to_string()))?;
                vec![value]
            }
        };
        trace!(option = %spec.long, depth, values = ?values, "Resolved option");

        let invalid = |source| ParseError::InvalidValue {
            option: raw.to_string(),
            source,
        };
        match &mut frame.level.slots[index] {
            Slot::Field(field) => {
                let refs: Vec<&str> = values.iter().map(String::as_str).collect();
                field.assign(&refs).map_err(invalid)?;
            }
            Slot::Builtin => {
                if let Some(last) = values.last() {
                    self.help_requested = bool::from_arg(last).map_err(invalid)?;
                }
            }
        }
        Ok(())
    }

    /// Finds the frame and option index answering to `name`, innermost
    /// frame first.
    fn resolve(&self, name: &str) -> Option<(usize, usize)> {
        self.frames.iter().enumerate().rev().find_map(|(depth, frame)| {
            frame
                .level
                .spec
                .options
                .iter()
                .position(|o| o.matches(name))
                .map(|index| (depth, index))
        })
    }

    fn check_required(&self) -> Result<(), ParseError> {
        for frame in &self.frames {
            let missing = frame
                .level
                .spec
                .options
                .iter()
                .zip(&frame.present)
                .find(|(spec, present)| spec.required && !spec.positional && !**present);
            if let Some((spec, _)) = missing {
                return Err(ParseError::Required(format!("--{}", spec.long)));
            }
        }
        Ok(())
    }

    fn active_chain(&self) -> Vec<&CommandSpec> {
        self.frames.iter().map(|f| &f.level.spec).collect()
    }

    fn decorations(&self) -> Decorations<'_> {
        Decorations {
            description: self.config.description.as_deref(),
            epilogue: self.config.epilogue.as_deref(),
        }
    }

    /// Writes the usage line of the innermost active level.
    pub fn write_usage<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", help::usage_line(&self.active_chain()))
    }

    /// Writes full help for the innermost active level.
    pub fn write_help<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        let chain = self.active_chain();
        let text = help::help_text(&chain, self.config.help_column, self.decorations());
        out.write_all(text.as_bytes())
    }

    /// Writes full help for the level reached by following `path` from the
    /// root, whether or not that subcommand was activated.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownSubcommand`] naming the first element
    /// of `path` that does not resolve.
    pub fn write_help_for_subcommand<W, S>(
        &self,
        out: &mut W,
        path: &[S],
    ) -> Result<(), RenderError>
    where
        W: Write + ?Sized,
        S: AsRef<str>,
    {
        let chain = self
            .spec()
            .walk(path)
            .map_err(RenderError::UnknownSubcommand)?;
        let text = help::help_text(&chain, self.config.help_column, self.decorations());
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Writes the usage line of the innermost active level followed by
    /// `error: {err}`.
    pub fn write_error<W: Write + ?Sized>(
        &self,
        out: &mut W,
        err: &ParseError,
    ) -> std::io::Result<()> {
        self.write_usage(out)?;
        writeln!(out, "error: {err}")
    }
}

fn program_from_env() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string())
}
