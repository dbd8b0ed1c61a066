use std::{fmt::Display, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Enum representing values allowed as map keys.
///
/// Keys are ordered first by kind and then by value, so iterating a map is
/// deterministic. An integer key and a float key are never equal, even when
/// they denote the same number.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MapKey {
    /// A boolean such as `true`.
    Bool(bool),
    /// An integer such as `-4` or `42`.
    Integer(i64),
    /// A float such as `2.5`, totally ordered.
    Float(OrderedFloat<f64>),
    /// A character such as `'a'`.
    Character(char),
    /// A string such as `"apple"`.
    Str(Rc<str>),
}

impl MapKey {
    /// Converts a runtime value into a map key.
    ///
    /// # Errors
    /// `TypeMismatch` for arrays, maps, callables and unit.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::value::{core::Value, map_key::MapKey};
    ///
    /// assert_eq!(MapKey::from_value(&Value::Integer(3), 1).unwrap(),
    ///            MapKey::Integer(3));
    /// assert!(MapKey::from_value(&Value::Unit, 1).is_err());
    /// ```
    pub fn from_value(value: &Value, line: usize) -> EvalResult<Self> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Integer(n) => Ok(Self::Integer(*n)),
            Value::Float(x) => Ok(Self::Float(OrderedFloat(*x))),
            Value::Character(c) => Ok(Self::Character(*c)),
            Value::Str(s) => Ok(Self::Str(Rc::clone(s))),
            other => {
                Err(RuntimeError::type_mismatch(format!("{} cannot be used as a map key",
                                                        other.type_name()),
                                                line))
            },
        }
    }
}

impl From<&MapKey> for Value {
    fn from(key: &MapKey) -> Self {
        match key {
            MapKey::Bool(b) => Self::Bool(*b),
            MapKey::Integer(n) => Self::Integer(*n),
            MapKey::Float(x) => Self::Float(x.into_inner()),
            MapKey::Character(c) => Self::Character(*c),
            MapKey::Str(s) => Self::Str(Rc::clone(s)),
        }
    }
}

impl Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::from(self).repr())
    }
}
