use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::comparison::{compare_values, values_equal},
            core::{Context, EvalResult},
            function::core::expect_args,
        },
        value::{core::Value, map_key::MapKey},
    },
};

/// Returns a new array with `value` appended; the argument is not modified.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::collection::push},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let xs = Value::from(vec![Value::Integer(1)]);
/// let ys = push(&mut context, &[xs.clone(), Value::Integer(2)], 1).unwrap();
///
/// assert_eq!(ys, Value::from(vec![Value::Integer(1), Value::Integer(2)]));
/// assert_eq!(xs, Value::from(vec![Value::Integer(1)]));
/// ```
pub fn push(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [array, value] = expect_args::<2>("push", args, line)?;

    let mut elements = array.as_array(line)?.as_ref().clone();
    elements.push(value.clone());
    Ok(Value::from(elements))
}

/// The keys of a map, in key order.
pub fn keys(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [map] = expect_args::<1>("keys", args, line)?;
    Ok(Value::from(map.as_map(line)?.keys().map(Value::from).collect::<Vec<_>>()))
}

/// The values of a map, in key order.
pub fn values(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [map] = expect_args::<1>("values", args, line)?;
    Ok(Value::from(map.as_map(line)?.values().cloned().collect::<Vec<_>>()))
}

/// Tests whether a map has an entry for `key`.
pub fn has_key(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [map, key] = expect_args::<2>("has_key", args, line)?;

    let entries = map.as_map(line)?;
    let key = MapKey::from_value(key, line)?;
    Ok(Value::Bool(entries.contains_key(&key)))
}

/// Looks up `key` in a map, returning `default` when there is no entry.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
///
/// use slate::interpreter::{evaluator::{core::Context, function::collection::get},
///                          value::{core::Value, map_key::MapKey}};
///
/// let mut context = Context::new();
/// let mut entries = BTreeMap::new();
/// entries.insert(MapKey::Str("a".into()), Value::Integer(1));
/// let map = Value::from(entries);
///
/// let hit = get(&mut context, &[map.clone(), Value::from("a"), Value::Integer(0)], 1);
/// let miss = get(&mut context, &[map, Value::from("b"), Value::Integer(0)], 1);
///
/// assert_eq!(hit.unwrap(), Value::Integer(1));
/// assert_eq!(miss.unwrap(), Value::Integer(0));
/// ```
pub fn get(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [map, key, default] = expect_args::<3>("get", args, line)?;

    let entries = map.as_map(line)?;
    let key = MapKey::from_value(key, line)?;
    Ok(match entries.get(&key) {
        Some(value) => value.clone(),
        None => default.clone(),
    })
}

/// Membership test.
///
/// - Arrays: any element equal to `needle` (using `==` semantics).
/// - Strings: `needle` is a substring or a character of the string.
/// - Maps: `needle` is a key.
pub fn contains(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [haystack, needle] = expect_args::<2>("contains", args, line)?;

    let found = match haystack {
        Value::Array(elements) => {
            let mut found = false;
            for element in elements.iter() {
                if values_equal(element, needle, line)? {
                    found = true;
                    break;
                }
            }
            found
        },
        Value::Str(s) => match needle {
            Value::Str(part) => s.contains(&**part),
            Value::Character(c) => s.contains(*c),
            other => {
                return Err(RuntimeError::type_mismatch(format!("cannot search a String for {}",
                                                               other.type_name()),
                                                       line));
            },
        },
        Value::Map(entries) => entries.contains_key(&MapKey::from_value(needle, line)?),
        other => {
            return Err(RuntimeError::type_mismatch(format!("'contains' expects an Array, String or Map, found {}",
                                                           other.type_name()),
                                                   line));
        },
    };
    Ok(Value::Bool(found))
}

/// Returns the elements of an array in ascending order.
///
/// Elements must be mutually comparable: numbers, strings or characters.
/// The sort is stable.
///
/// # Errors
/// `TypeMismatch` for elements that cannot be compared with each other and
/// `InvalidArgument` for `NaN`.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::collection::sorted},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let xs = Value::from(vec![Value::Integer(3), Value::Float(1.5), Value::Integer(2)]);
///
/// assert_eq!(sorted(&mut context, &[xs], 1).unwrap(),
///            Value::from(vec![Value::Float(1.5), Value::Integer(2), Value::Integer(3)]));
/// ```
pub fn sorted(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [array] = expect_args::<1>("sorted", args, line)?;

    let mut elements = array.as_array(line)?.as_ref().clone();
    check_sortable(&elements, line)?;

    // Every pair is known to be comparable, so the fallback is unreachable.
    elements.sort_by(|a, b| {
                compare_values(a, b, line).ok()
                                          .flatten()
                                          .unwrap_or(Ordering::Equal)
            });
    Ok(Value::from(elements))
}

/// Verifies that the elements form a total order before sorting.
fn check_sortable(elements: &[Value], line: usize) -> EvalResult<()> {
    let Some(first) = elements.first() else {
        return Ok(());
    };
    let has_float = elements.iter().any(|e| matches!(e, Value::Float(_)));

    for element in elements {
        if let Value::Float(x) = element
           && x.is_nan()
        {
            return Err(RuntimeError::InvalidArgument { details: "cannot sort NaN".to_string(),
                                                       line });
        }
        // Fails for elements of unrelated types.
        compare_values(first, element, line)?;
        if has_float {
            element.as_float(line)?;
        }
    }
    Ok(())
}
