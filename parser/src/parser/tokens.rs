//! Token classification.
//!
//! The scanner is a two-state machine. While scanning, a token is either
//! the `--` separator, an option (`-x`, `--name`, `--name=value`), or a
//! positional. After `--` every token is a positional, except that a
//! further `--` is still dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scanning,
    AllPositional,
}

/// One classified input token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A positional value. `after_separator` is set once `--` was seen.
    Positional { value: String, after_separator: bool },
    /// An option, with its dashes stripped and any inline `=value` split
    /// off. `raw` is the token as given, for error messages.
    Option {
        raw: String,
        name: String,
        inline: Option<String>,
    },
}

/// Cursor over the raw input tokens.
#[derive(Debug)]
pub(crate) struct Tokens {
    items: std::vec::IntoIter<String>,
    peeked: Option<String>,
    mode: Mode,
}

impl Tokens {
    pub(crate) fn new(items: Vec<String>) -> Self {
        Self {
            items: items.into_iter(),
            peeked: None,
            mode: Mode::Scanning,
        }
    }

    fn advance(&mut self) -> Option<String> {
        self.peeked.take().or_else(|| self.items.next())
    }

    fn peek(&mut self) -> Option<&str> {
        if self.peeked.is_none() {
            self.peeked = self.items.next();
        }
        self.peeked.as_deref()
    }

    /// Returns the next classified token, consuming separators.
    pub(crate) fn next_token(&mut self) -> Option<Token> {
        loop {
            let raw = self.advance()?;
            if raw == "--" {
                self.mode = Mode::AllPositional;
                continue;
            }
            if self.mode == Mode::AllPositional {
                return Some(Token::Positional {
                    value: raw,
                    after_separator: true,
                });
            }
            if !raw.starts_with('-') {
                return Some(Token::Positional {
                    value: raw,
                    after_separator: false,
                });
            }

            let stripped = raw.trim_start_matches('-');
            let (name, inline) = match stripped.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (stripped.to_string(), None),
            };
            return Some(Token::Option { raw, name, inline });
        }
    }

    /// Takes the next token as a value unless it looks like an option.
    pub(crate) fn next_value(&mut self) -> Option<String> {
        if self.mode == Mode::AllPositional {
            return None;
        }
        match self.peek() {
            Some(next) if !next.starts_with('-') => self.advance(),
            _ => None,
        }
    }

    /// Takes every following token up to the next one that looks like an
    /// option.
    pub(crate) fn take_values(&mut self) -> Vec<String> {
        let mut values = Vec::new();
        while let Some(value) = self.next_value() {
            values.push(value);
        }
        values
    }
}
