//! Type coercion from command-line tokens into typed destinations.
//!
//! [`FromArg`] turns one token into one scalar value. [`Field`] is the
//! writable destination bound to a record field: it reports its [`Shape`]
//! and assigns a batch of tokens, coercing each independently. Sequences
//! append in input order, mappings decode `key=value` tokens, and scalars
//! keep the last value they were given.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{ScalarKind, Shape};

/// Conversion failure for a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Token is not a recognized boolean literal.
    #[error("parsing {0:?}: invalid boolean, expected true or false")]
    Bool(String),
    /// Token is not an integer, or does not fit the destination width.
    #[error("parsing {text:?}: {source}")]
    Int {
        text: String,
        source: ParseIntError,
    },
    /// Token is not a floating point number.
    #[error("parsing {text:?}: {source}")]
    Float {
        text: String,
        source: ParseFloatError,
    },
    /// Token is not exactly one character.
    #[error("parsing {0:?}: expected a single character")]
    Char(String),
    /// A custom textual decoder rejected the token.
    #[error("parsing {text:?}: {message}")]
    Text { text: String, message: String },
    /// A mapping token has no `=` separator.
    #[error("error parsing {0:?}, expected format key=value")]
    MissingSeparator(String),
}

/// A scalar type that can be constructed from one command-line token.
///
/// Implement this for your own types to use them as destinations, then call
/// [`scalar_field!`](crate::scalar_field) to make them bindable. Types that
/// already implement [`FromStr`](std::str::FromStr) can use
/// [`from_str_arg!`](crate::from_str_arg) instead, which does both.
///
/// # Examples
///
/// ```
/// use argbind_core::{CoerceError, FromArg};
///
/// assert_eq!(i8::from_arg("-12"), Ok(-12));
/// assert!(matches!(u8::from_arg("300"), Err(CoerceError::Int { .. })));
/// assert_eq!(bool::from_arg("false"), Ok(false));
/// ```
pub trait FromArg: Sized {
    /// Kind reported in the option's shape.
    fn kind() -> ScalarKind;

    /// Decodes one token.
    fn from_arg(text: &str) -> Result<Self, CoerceError>;
}

/// A writable destination for one record field.
pub trait Field {
    /// Describes what the destination accepts.
    fn shape(&self) -> Shape;

    /// Coerces and stores `values`.
    ///
    /// Scalars receive exactly one value from the parser; sequences and
    /// mappings receive every token collected for one occurrence of the
    /// option. Nothing is written when any token fails to coerce.
    fn assign(&mut self, values: &[&str]) -> Result<(), CoerceError>;
}

impl FromArg for bool {
    fn kind() -> ScalarKind {
        ScalarKind::Bool
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        match text {
            "true" | "TRUE" | "True" | "t" | "T" | "1" => Ok(true),
            "false" | "FALSE" | "False" | "f" | "F" | "0" => Ok(false),
            _ => Err(CoerceError::Bool(text.to_string())),
        }
    }
}

impl FromArg for String {
    fn kind() -> ScalarKind {
        ScalarKind::String
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        Ok(text.to_string())
    }
}

impl FromArg for PathBuf {
    fn kind() -> ScalarKind {
        ScalarKind::Path
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        Ok(PathBuf::from(text))
    }
}

impl FromArg for char {
    fn kind() -> ScalarKind {
        ScalarKind::Char
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CoerceError::Char(text.to_string())),
        }
    }
}

macro_rules! int_from_arg {
    ($variant:ident: $($ty:ty),* $(,)?) => {$(
        impl FromArg for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$variant { bits: <$ty>::BITS }
            }

            fn from_arg(text: &str) -> Result<Self, CoerceError> {
                text.parse::<$ty>().map_err(|source| CoerceError::Int {
                    text: text.to_string(),
                    source,
                })
            }
        }
    )*};
}

int_from_arg!(Int: i8, i16, i32, i64, i128, isize);
int_from_arg!(Uint: u8, u16, u32, u64, u128, usize);

macro_rules! float_from_arg {
    ($($ty:ty => $bits:expr),* $(,)?) => {$(
        impl FromArg for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::Float { bits: $bits }
            }

            fn from_arg(text: &str) -> Result<Self, CoerceError> {
                text.parse::<$ty>().map_err(|source| CoerceError::Float {
                    text: text.to_string(),
                    source,
                })
            }
        }
    )*};
}

float_from_arg!(f32 => 32, f64 => 64);

/// Implements [`FromArg`] and [`Field`] for a type through its
/// [`FromStr`](std::str::FromStr) implementation.
///
/// The parser's error is rendered with `Display` into
/// [`CoerceError::Text`].
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use argbind_core::{Field, FromArg, ScalarKind, Shape, from_str_arg};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Level(u8);
///
/// impl FromStr for Level {
///     type Err = String;
///     fn from_str(s: &str) -> Result<Self, String> {
///         match s {
///             "low" => Ok(Level(1)),
///             "high" => Ok(Level(9)),
///             other => Err(format!("unknown level {other}")),
///         }
///     }
/// }
///
/// from_str_arg!(Level);
///
/// let mut level = Level::default();
/// assert_eq!(level.shape(), Shape::Scalar(ScalarKind::Text));
/// level.assign(&["high"]).unwrap();
/// assert_eq!(level, Level(9));
/// assert!(Level::from_arg("medium").is_err());
/// ```
#[macro_export]
macro_rules! from_str_arg {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::FromArg for $ty {
            fn kind() -> $crate::ScalarKind {
                $crate::ScalarKind::Text
            }

            fn from_arg(text: &str) -> ::std::result::Result<Self, $crate::CoerceError> {
                <$ty as ::std::str::FromStr>::from_str(text).map_err(|err| {
                    $crate::CoerceError::Text {
                        text: text.to_string(),
                        message: err.to_string(),
                    }
                })
            }
        }

        $crate::scalar_field!($ty);
    )*};
}

/// Implements [`Field`] for scalar types that implement [`FromArg`].
#[macro_export]
macro_rules! scalar_field {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::Field for $ty {
            fn shape(&self) -> $crate::Shape {
                $crate::Shape::Scalar(<$ty as $crate::FromArg>::kind())
            }

            fn assign(&mut self, values: &[&str]) -> ::std::result::Result<(), $crate::CoerceError> {
                if let Some(text) = values.last() {
                    *self = <$ty as $crate::FromArg>::from_arg(text)?;
                }
                Ok(())
            }
        }
    )*};
}

scalar_field!(
    bool, String, PathBuf, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64
);

from_str_arg!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

/// Elements of a sequence or mapping may be wrapped once in `Option`; a
/// decoded token is always `Some`.
impl<T: FromArg> FromArg for Option<T> {
    fn kind() -> ScalarKind {
        T::kind()
    }

    fn from_arg(text: &str) -> Result<Self, CoerceError> {
        T::from_arg(text).map(Some)
    }
}

impl<T: FromArg> Field for Option<T> {
    fn shape(&self) -> Shape {
        Shape::Scalar(T::kind())
    }

    fn assign(&mut self, values: &[&str]) -> Result<(), CoerceError> {
        if let Some(text) = values.last() {
            *self = Some(T::from_arg(text)?);
        }
        Ok(())
    }
}

impl<T: FromArg> Field for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence(T::kind())
    }

    fn assign(&mut self, values: &[&str]) -> Result<(), CoerceError> {
        let parsed = values
            .iter()
            .map(|text| T::from_arg(text))
            .collect::<Result<Vec<_>, _>>()?;
        self.extend(parsed);
        Ok(())
    }
}

fn split_pair<K: FromArg, V: FromArg>(text: &str) -> Result<(K, V), CoerceError> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| CoerceError::MissingSeparator(text.to_string()))?;
    Ok((K::from_arg(key)?, V::from_arg(value)?))
}

impl<K, V> Field for HashMap<K, V>
where
    K: FromArg + Eq + Hash,
    V: FromArg,
{
    fn shape(&self) -> Shape {
        Shape::Mapping {
            key: K::kind(),
            value: V::kind(),
        }
    }

    fn assign(&mut self, values: &[&str]) -> Result<(), CoerceError> {
        let pairs = values
            .iter()
            .map(|text| split_pair::<K, V>(text))
            .collect::<Result<Vec<_>, _>>()?;
        self.extend(pairs);
        Ok(())
    }
}

impl<K, V> Field for BTreeMap<K, V>
where
    K: FromArg + Ord,
    V: FromArg,
{
    fn shape(&self) -> Shape {
        Shape::Mapping {
            key: K::kind(),
            value: V::kind(),
        }
    }

    fn assign(&mut self, values: &[&str]) -> Result<(), CoerceError> {
        let pairs = values
            .iter()
            .map(|text| split_pair::<K, V>(text))
            .collect::<Result<Vec<_>, _>>()?;
        self.extend(pairs);
        Ok(())
    }
}
