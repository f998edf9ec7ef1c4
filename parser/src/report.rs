//! Turning a parse result into output and an exit status.

use std::io::Write;

use crate::parser::{Outcome, Parser};

/// Exit status after printing help.
pub const HELP_STATUS: i32 = 0;

/// Exit status after a parse error.
pub const FAILURE_STATUS: i32 = 1;

impl Parser<'_> {
    /// Parses `tokens` and reports anything that should end the program.
    ///
    /// Returns `None` when parsing succeeded and the program should go on.
    /// On a help request, full help goes to `out` and `Some(HELP_STATUS)` is
    /// returned; on an error, the usage line and the error go to `err` and
    /// `Some(FAILURE_STATUS)` is returned. Write failures on either sink are
    /// ignored.
    pub fn parse_or_report<I, O, E>(
        &mut self,
        tokens: I,
        out: &mut O,
        err: &mut E,
    ) -> Option<i32>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        match self.parse(tokens) {
            Ok(Outcome::Parsed) => None,
            Ok(Outcome::Help) => {
                let _ = self.write_help(out);
                Some(HELP_STATUS)
            }
            Err(error) => {
                let _ = self.write_error(err, &error);
                Some(FAILURE_STATUS)
            }
        }
    }

    /// Like [`parse_or_report`](Self::parse_or_report) on stdout and stderr,
    /// exiting the process instead of returning a status.
    pub fn parse_or_exit<I>(&mut self, tokens: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let status = self.parse_or_report(
            tokens,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        );
        if let Some(status) = status {
            std::process::exit(status);
        }
    }
}
