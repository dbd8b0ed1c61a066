use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            function::core::BUILTIN_FUNCTIONS,
        },
        value::{core::Value, map_key::MapKey},
    },
    util::num::checked_index,
};

impl Context {
    /// Evaluates the elements of an array literal from left to right.
    pub(crate) fn eval_array_literal(&mut self, elements: &[Expr]) -> Flow<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.eval(element)?);
        }
        Ok(Value::from(values))
    }

    /// Evaluates the entries of a map literal in source order.
    ///
    /// A key that appears more than once keeps the last value.
    pub(crate) fn eval_map_literal(&mut self, entries: &[(Expr, Expr)]) -> Flow<Value> {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let line = key.line_number();
            let key = MapKey::from_value(&self.eval(key)?, line)?;
            let value = self.eval(value)?;
            map.insert(key, value);
        }
        Ok(Value::from(map))
    }

    /// Reads an element out of a collection.
    ///
    /// - Arrays are indexed by integer position.
    /// - Strings are indexed by character position and yield a `Character`.
    /// - Maps are indexed by key; a missing key yields unit.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for positions outside the collection and
    /// `TypeMismatch` for non-collections or keys of the wrong type.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let array = Value::from(vec![Value::Integer(10), Value::Integer(20)]);
    /// assert_eq!(Context::eval_index(&array, &Value::Integer(1), 1).unwrap(),
    ///            Value::Integer(20));
    /// assert_eq!(Context::eval_index(&array, &Value::Integer(2), 1),
    ///            Err(RuntimeError::IndexOutOfBounds { len: 2, found: 2, line: 1 }));
    ///
    /// let text = Value::from("héllo");
    /// assert_eq!(Context::eval_index(&text, &Value::Integer(1), 1).unwrap(),
    ///            Value::Character('é'));
    /// ```
    pub fn eval_index(target: &Value, index: &Value, line: usize) -> EvalResult<Value> {
        match target {
            Value::Array(elements) => {
                let position = checked_index(index.as_integer(line)?, elements.len(), line)?;
                Ok(elements[position].clone())
            },
            Value::Str(s) => {
                let wanted = index.as_integer(line)?;
                let len = s.chars().count();
                let position = checked_index(wanted, len, line)?;
                s.chars()
                 .nth(position)
                 .map(Value::Character)
                 .ok_or(RuntimeError::IndexOutOfBounds { len,
                                                         found: wanted,
                                                         line })
            },
            Value::Map(entries) => {
                let key = MapKey::from_value(index, line)?;
                Ok(entries.get(&key).cloned().unwrap_or(Value::Unit))
            },
            other => Err(RuntimeError::type_mismatch(format!("cannot index into {}",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Writes an element of the collection stored in `slot`.
    ///
    /// Arrays replace an existing position; maps insert or replace an entry.
    /// Storage shared with other bindings is copied first, so the write is
    /// only visible through this binding.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for positions outside an array, and `TypeMismatch`
    /// for strings, which are immutable, and for non-collections.
    pub fn set_index(slot: &mut Value, index: &Value, value: Value, line: usize) -> EvalResult<()> {
        match slot {
            Value::Array(elements) => {
                let position = checked_index(index.as_integer(line)?, elements.len(), line)?;
                Rc::make_mut(elements)[position] = value;
                Ok(())
            },
            Value::Map(entries) => {
                let key = MapKey::from_value(index, line)?;
                Rc::make_mut(entries).insert(key, value);
                Ok(())
            },
            other => Err(RuntimeError::type_mismatch(format!("cannot assign into an element of {}",
                                                             other.type_name()),
                                                     line)),
        }
    }
}

/// Checks whether a name refers to a reserved identifier.
///
/// Builtin function names are reserved: they cannot be bound by `let`, `var`,
/// function definitions, parameters or loop variables.
///
/// # Example
/// ```
/// use slate::interpreter::evaluator::utils::is_reserved_identifier;
///
/// assert!(is_reserved_identifier("print"));
/// assert!(is_reserved_identifier("curry"));
/// assert!(!is_reserved_identifier("my_function"));
/// ```
#[must_use]
pub fn is_reserved_identifier(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}
