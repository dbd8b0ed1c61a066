use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{closure::Closure, map_key::MapKey},
    },
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// bindings, function returns and conditions.
///
/// Arrays, strings and maps behave as values: they are shared behind an `Rc`
/// and copied on the first write, so `let b = a` followed by `b[0] = 9`
/// leaves `a` untouched. Closures are shared by reference.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64 bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators and required by conditions.
    Bool(bool),
    /// An immutable string.
    Str(Rc<str>),
    /// A single Unicode scalar value.
    Character(char),
    /// An array of `Value` elements.
    Array(Rc<Vec<Self>>),
    /// A map ordered by key.
    Map(Rc<BTreeMap<MapKey, Self>>),
    /// A user closure or named function.
    Closure(Rc<Closure>),
    /// A native function from the builtin table, by name.
    Builtin(&'static str),
    /// The absence of a meaningful value, written `()`.
    Unit,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Character(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<BTreeMap<MapKey, Self>> for Value {
    fn from(v: BTreeMap<MapKey, Self>) -> Self {
        Self::Map(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(n) => (*n).into(),
            LiteralValue::Float(x) => (*x).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => Self::Str(Rc::clone(s)),
            LiteralValue::Character(c) => (*c).into(),
            LiteralValue::Unit => Self::Unit,
        }
    }
}

/// Structural equality.
///
/// Numbers of different kinds are never equal here; the language-level `==`
/// promotes mixed operands before comparing. A closure is equal only to
/// copies of itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Character(a), Self::Character(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Closure(a), Self::Closure(b)) => a.same_as(b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            (Self::Unit, Self::Unit) => true,
            _ => false,
        }
    }
}

impl Value {
    /// Returns the name of the value's type as used in error messages.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "Integer");
    /// assert_eq!(Value::from("hi").type_name(), "String");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::Str(_) => "String",
            Self::Character(_) => "Character",
            Self::Array(_) => "Array",
            Self::Map(_) => "Map",
            Self::Closure(_) | Self::Builtin(_) => "Function",
            Self::Unit => "Unit",
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions and logical operators; there is no truthiness.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::type_mismatch(format!("expected Bool, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => Err(RuntimeError::type_mismatch(format!("expected Integer, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Converts a numeric value to an `f64`.
    ///
    /// Integers are promoted with a checked conversion, so integers that
    /// cannot be represented exactly fail with `ArithmeticOverflow`.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_float(1).unwrap(), 10.0);
    /// assert!(Value::Integer(i64::MAX).as_float(1).is_err());
    /// assert!(Value::Bool(true).as_float(1).is_err());
    /// ```
    pub fn as_float(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Float(x) => Ok(*x),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::ArithmeticOverflow { line }),
            other => Err(RuntimeError::type_mismatch(format!("expected a number, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Returns the elements of an array, or an error for any other value.
    pub fn as_array(&self, line: usize) -> EvalResult<&Rc<Vec<Self>>> {
        match self {
            Self::Array(a) => Ok(a),
            other => Err(RuntimeError::type_mismatch(format!("expected Array, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Returns the entries of a map, or an error for any other value.
    pub fn as_map(&self, line: usize) -> EvalResult<&Rc<BTreeMap<MapKey, Self>>> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(RuntimeError::type_mismatch(format!("expected Map, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Returns the text of a string, or an error for any other value.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(RuntimeError::type_mismatch(format!("expected String, found {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Returns `true` for integers and floats.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Returns `true` for the unit value.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// Returns the source-like representation of the value.
    ///
    /// Unlike `Display`, strings and characters are quoted. Elements of
    /// arrays and maps always use this form.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::value::core::Value;
    ///
    /// let v = Value::from(vec![Value::from("a"), Value::from('b')]);
    /// assert_eq!(v.repr(), r#"["a", 'b']"#);
    /// assert_eq!(Value::from("a").repr(), r#""a""#);
    /// assert_eq!(Value::from("a").to_string(), "a");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => format!("{:?}", &**s),
            Self::Character(c) => format!("{c:?}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // Debug keeps a trailing `.0` on whole floats.
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Character(c) => write!(f, "{c}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{}", value.repr())?;
                }

                write!(f, "]")
            },
            Self::Map(m) => {
                if m.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{")?;
                for (index, (key, value)) in m.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {}", value.repr())?;
                }
                write!(f, "}}")
            },
            Self::Closure(c) => write!(f, "{c}"),
            Self::Builtin(name) => write!(f, "<builtin {name}>"),
            Self::Unit => write!(f, "()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn floats_keep_their_decimal_point() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
    }

    #[test]
    fn maps_display_in_key_order() {
        let mut entries = BTreeMap::new();
        entries.insert(MapKey::Str("b".into()), Value::Integer(2));
        entries.insert(MapKey::Str("a".into()), Value::from("x"));
        assert_eq!(Value::from(entries).to_string(), r#"{"a": "x", "b": 2}"#);
    }

    #[test]
    fn mixed_numbers_are_not_structurally_equal() {
        assert_ne!(Value::Integer(1), Value::Float(1.0));
        assert_eq!(Value::Unit, Value::Unit);
    }
}
