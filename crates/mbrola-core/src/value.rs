//! Caller-facing input values
//!
//! Utterance fields accept several shapes (a bare word, a single integer, a
//! list mixing integers and contours). `Value` carries whatever the caller
//! handed in so each validator can discriminate it once and produce the
//! canonical form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A loosely-typed input value
///
/// `List` is the growable sequence shape every multi-valued field accepts.
/// `Tuple` is a fixed-size sequence; only outer silences take it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Integer payload. Booleans and floats are not integers.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a `List`
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Elements of either sequence shape
    #[inline]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

/// Text form, also used to coerce list elements into phoneme tokens
///
/// Scalars render as `None`, `True`/`False`, `1`, `1.0`, `1e+20`. Strings
/// nested in a sequence are quoted, and a one-element tuple keeps its
/// trailing comma: `['a', 1]`, `(1,)`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            other => write_repr(f, other),
        }
    }
}

fn write_repr(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::None => write!(f, "None"),
        Value::Bool(true) => write!(f, "True"),
        Value::Bool(false) => write!(f, "False"),
        Value::Int(v) => write!(f, "{}", v),
        Value::Float(v) => write_float(f, *v),
        Value::Str(s) => write!(f, "'{}'", s),
        Value::List(items) => write_seq(f, '[', ']', items),
        Value::Tuple(items) if items.len() == 1 => {
            write!(f, "(")?;
            write_repr(f, &items[0])?;
            write!(f, ",)")
        }
        Value::Tuple(items) => write_seq(f, '(', ')', items),
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return write!(f, "nan");
    }
    if v.is_infinite() {
        return write!(f, "{}", if v > 0.0 { "inf" } else { "-inf" });
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        // `{:e}` gives `1e20` / `1.5e-5`; the exponent is signed and two digits wide
        let text = format!("{:e}", v);
        return match text.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => write!(f, "{}", text),
        };
    }
    if v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, close: char, items: &[Value]) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_repr(f, item)?;
    }
    write!(f, "{}", close)
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

/// Build a `Value::List` from heterogeneous elements
///
/// ```rust
/// use mbrola_core::{list, Value};
///
/// let pitch = list![200, list![200, 10, 200], 200];
/// assert_eq!(pitch.as_list().map(|l| l.len()), Some(3));
/// ```
#[macro_export]
macro_rules! list {
    () => { $crate::Value::List(::std::vec::Vec::new()) };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Build a `Value::Tuple` from heterogeneous elements
#[macro_export]
macro_rules! tuple {
    ($($item:expr),* $(,)?) => {
        $crate::Value::Tuple(::std::vec![$($crate::Value::from($item)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(200), Value::Int(200));
        assert_eq!(Value::from(200u32), Value::Int(200));
        assert_eq!(Value::from("mbrola"), Value::Str("mbrola".into()));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(
            Value::from((1, "a")),
            Value::Tuple(vec![Value::Int(1), Value::Str("a".into())])
        );
    }

    #[test]
    fn test_macros_mix_shapes() {
        let v = list![200, list![200, 10], tuple!(1, 2)];
        let items = v.as_list().unwrap();
        assert_eq!(items[0], Value::Int(200));
        assert!(items[1].is_list());
        assert!(items[2].is_tuple());
    }

    #[test]
    fn test_bool_is_not_int() {
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Float(1.0).as_int(), None);
        assert_eq!(Value::Int(1).as_int(), Some(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(12).to_string(), "12");
        assert_eq!(Value::from("a").to_string(), "a");
        assert_eq!(list![1, "b"].to_string(), "[1, 'b']");
        assert_eq!(tuple!(1, 2).to_string(), "(1, 2)");
        assert_eq!(tuple!(1).to_string(), "(1,)");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_display_scalars_as_phoneme_tokens() {
        assert_eq!(Value::None.to_string(), "None");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::from(false).to_string(), "False");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(-0.0).to_string(), "-0.0");
        assert_eq!(Value::from(0.1).to_string(), "0.1");
        assert_eq!(Value::from(1e20).to_string(), "1e+20");
        assert_eq!(Value::from(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::from(f64::NAN).to_string(), "nan");
        assert_eq!(list![Value::None, list![true]].to_string(), "[None, [True]]");
    }

    #[test]
    fn test_deserialize_json() {
        let v: Value = serde_json::from_str(r#"[200, [200, 10, 200], "a", 1.5, null]"#).unwrap();
        assert_eq!(
            v,
            list![200, list![200, 10, 200], "a", 1.5, Value::None]
        );
    }
}
