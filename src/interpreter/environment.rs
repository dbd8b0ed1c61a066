use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            closure::{Closure, Function},
            core::Value,
        },
    },
};

/// A single bound name.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The current value.
    pub value:   Value,
    /// `true` for `var` bindings, which may be reassigned.
    pub mutable: bool,
}

/// A value as held by a scope.
enum Slot {
    Value(Value),
    /// A closure that captured the scope holding it. Only its code is kept and
    /// the environment is put back on every read, so the scope and the
    /// closure do not keep each other alive.
    OwnClosure(Rc<Function>),
}

struct Entry {
    slot:    Slot,
    mutable: bool,
}

#[derive(Default)]
struct Scope {
    bindings: BTreeMap<String, Entry>,
    parent:   Option<Environment>,
}

/// A reference-counted, mutable scope with an optional parent.
///
/// Cloning an `Environment` yields another handle to the same scope, which is
/// how closures capture their surroundings by reference: a closure and the
/// block that created it read and write the same bindings.
///
/// # Example
/// ```
/// use slate::interpreter::{environment::Environment, value::core::Value};
///
/// let global = Environment::default();
/// global.define("x", Value::Integer(1), true);
///
/// let inner = global.child();
/// inner.assign("x", Value::Integer(2), 1).unwrap();
///
/// assert_eq!(global.get("x"), Some(Value::Integer(2)));
/// ```
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

/// A handle that does not keep its scope alive.
#[derive(Clone)]
pub struct WeakEnvironment(Weak<RefCell<Scope>>);

impl WeakEnvironment {
    /// Returns the scope if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }

    /// Returns `true` while some `Environment` still refers to the scope.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl Environment {
    /// Creates a new scope whose lookups fall back to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Scope { bindings: BTreeMap::new(),
                                          parent:   Some(self.clone()), })))
    }

    /// Returns `true` when both handles refer to the same scope.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Creates a handle that does not keep this scope alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.0))
    }

    fn pack(&self, value: Value) -> Slot {
        match value {
            Value::Closure(closure) if closure.env.ptr_eq(self) => {
                Slot::OwnClosure(Rc::clone(&closure.function))
            },
            value => Slot::Value(value),
        }
    }

    fn unpack(&self, slot: &Slot) -> Value {
        match slot {
            Slot::Value(value) => value.clone(),
            Slot::OwnClosure(function) => {
                Value::Closure(Rc::new(Closure { function: Rc::clone(function),
                                                 env:      self.clone(), }))
            },
        }
    }

    /// Looks up `name` in this scope and then in each enclosing scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        match scope.bindings.get(name) {
            Some(entry) => Some(self.unpack(&entry.slot)),
            None => scope.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    /// Binds `name` in this scope, replacing any binding of the same name in
    /// this scope and shadowing those of enclosing scopes.
    pub fn define(&self, name: impl Into<String>, value: Value, mutable: bool) {
        let slot = self.pack(value);
        self.0
            .borrow_mut()
            .bindings
            .insert(name.into(), Entry { slot, mutable });
    }

    /// Replaces the value of the nearest binding called `name`.
    ///
    /// # Errors
    /// - `AssignmentToImmutable` when the nearest binding is not a `var`.
    /// - `UndefinedIdentifier` when no scope binds `name`.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        self.update(name, line, |slot| {
                *slot = value;
                Ok(())
            })
    }

    /// Applies `f` to the value of the nearest mutable binding called `name`
    /// in place.
    ///
    /// `f` must not access the environment.
    ///
    /// # Errors
    /// The same as [`Environment::assign`], plus any error returned by `f`.
    pub fn update<R>(&self,
                     name: &str,
                     line: usize,
                     f: impl FnOnce(&mut Value) -> EvalResult<R>)
                     -> EvalResult<R> {
        let mut scope = self.0.borrow_mut();
        if let Some(entry) = scope.bindings.get_mut(name) {
            if !entry.mutable {
                return Err(RuntimeError::AssignmentToImmutable { name: name.to_string(),
                                                                 line });
            }
            // Moved out rather than cloned so copy-on-write updates of the
            // value stay in place.
            let mut value = match std::mem::replace(&mut entry.slot, Slot::Value(Value::Unit)) {
                Slot::Value(value) => value,
                own @ Slot::OwnClosure(_) => self.unpack(&own),
            };
            let result = f(&mut value);
            entry.slot = self.pack(value);
            return result;
        }
        match &scope.parent {
            Some(parent) => parent.update(name, line, f),
            None => Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                            line }),
        }
    }

    /// Returns the bindings of this scope only, ordered by name.
    #[must_use]
    pub fn bindings(&self) -> Vec<(String, Binding)> {
        self.0
            .borrow()
            .bindings
            .iter()
            .map(|(name, entry)| {
                (name.clone(),
                 Binding { value:   self.unpack(&entry.slot),
                           mutable: entry.mutable, })
            })
            .collect()
    }

    /// Removes every binding of this scope.
    ///
    /// Values stored in a scope may keep that scope alive, for example a
    /// closure inside an array that captured it; clearing breaks the cycle.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.0.borrow_mut().bindings);
        drop(bindings);
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("Environment")
         .field("names", &scope.bindings.keys().collect::<Vec<_>>())
         .field("has_parent", &scope.parent.is_some())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn child_scopes_shadow_without_touching_parent() {
        let global = Environment::default();
        global.define("x", Value::Integer(1), false);

        let inner = global.child();
        inner.define("x", Value::Integer(2), false);

        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn assigning_a_let_binding_fails() {
        let global = Environment::default();
        global.define("x", Value::Integer(1), false);

        assert_eq!(global.child().assign("x", Value::Integer(2), 4),
                   Err(RuntimeError::AssignmentToImmutable { name: "x".to_string(),
                                                             line: 4, }));
    }

    #[test]
    fn assigning_an_unbound_name_fails() {
        let global = Environment::default();
        assert!(matches!(global.assign("y", Value::Unit, 1),
                         Err(RuntimeError::UndefinedIdentifier { .. })));
    }

    #[test]
    fn clones_share_the_same_scope() {
        let global = Environment::default();
        let alias = global.clone();
        alias.define("z", Value::Bool(true), true);

        assert_eq!(global.get("z"), Some(Value::Bool(true)));
        assert_eq!(global.bindings().len(), 1);

        global.clear();
        assert_eq!(alias.get("z"), None);
    }
}
