use std::{fmt, rc::Rc};

use crate::{ast::Expr, interpreter::environment::Environment};

/// The code of a closure: everything but the captured environment.
///
/// Every evaluation of a closure expression or function definition creates a
/// new `Function`, so two closures with the same `Function` and the same
/// environment are the same closure.
pub struct Function {
    /// The name given by a function definition; `None` for closure literals.
    pub name:   Option<String>,
    /// Parameter names, bound immutably on each call.
    pub params: Vec<String>,
    /// The body evaluated on each call.
    pub body:   Rc<Expr>,
}

/// A callable value created by a closure expression or a function definition.
///
/// The captured environment is shared with the scope the closure was created
/// in: bindings are looked up when the body runs, so later mutations of a
/// captured `var` are observed, and assignments made by the body are visible
/// outside.
pub struct Closure {
    /// Parameters, body and name.
    pub function: Rc<Function>,
    /// The environment captured at creation.
    pub env:      Environment,
}

impl Closure {
    /// Name used in diagnostics: the function name, or `<closure>`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.function.name.as_deref().unwrap_or("<closure>")
    }

    /// Number of parameters the closure accepts.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.function.params.len()
    }

    /// Returns `true` when both closures come from the same evaluation of
    /// the same definition.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.function, &other.function) && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Synthesized parameters start with '%' and are not user-visible.
        let params = self.function
                         .params
                         .iter()
                         .map(|p| if p.starts_with('%') { "_" } else { p.as_str() })
                         .collect::<Vec<_>>()
                         .join(", ");
        match &self.function.name {
            Some(name) => write!(f, "<fn {name}({params})>"),
            None => write!(f, "<closure({params})>"),
        }
    }
}

// The environment may contain this closure, so it is left out.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("name", &self.function.name)
         .field("params", &self.function.params)
         .finish_non_exhaustive()
    }
}
