use std::rc::Rc;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant scalars that can appear directly in
/// source code. Collections are built from expressions instead, see
/// [`Expr::ArrayLiteral`] and [`Expr::MapLiteral`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A string literal with escapes already decoded.
    Str(Rc<str>),
    /// A character literal such as `'a'`.
    Character(char),
    /// The unit value `()`.
    Unit,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<char> for LiteralValue {
    fn from(value: char) -> Self {
        Self::Character(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant models a distinct syntactic construct and records the source
/// line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean, ...).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    Variable {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, ...).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call of any callable expression, e.g. `f(1)` or `curry(f)(1)(2)`.
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// Arguments to the call.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// An anonymous closure such as `|a, b| a + b`.
    Closure {
        /// Parameter names.
        params: Vec<String>,
        /// The body evaluated on each invocation.
        body:   Rc<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Conditional ("if-then-else") expression.
    IfExpr {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is false.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// For-expression over a range or a collection.
    ForExpr {
        /// Loop variable, iteration source and body.
        context: ForExprContext,
        /// Line number in the source code.
        line:    usize,
    },
    /// `while <condition> do { ... }`.
    WhileExpr {
        /// Condition checked before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A block containing multiple statements.
    Block {
        /// Statements inside the block.
        statements: Vec<Statement>,
        /// Line number in the source code.
        line:       usize,
    },
    /// Array literal expression.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Map literal expression, e.g. `{"a": 1, "b": 2}`.
    MapLiteral {
        /// Key/value expression pairs in source order.
        entries: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Indexing expression (e.g., `arr[2]`, `map["key"]`).
    Index {
        /// The collection to index into.
        target: Box<Self>,
        /// The index or key.
        index:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use slate::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Call { line, .. }
            | Self::Closure { line, .. }
            | Self::IfExpr { line, .. }
            | Self::ForExpr { line, .. }
            | Self::WhileExpr { line, .. }
            | Self::Block { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::MapLiteral { line, .. }
            | Self::Index { line, .. } => *line,
        }
    }

    /// Returns `true` when this expression is a body whose value is returned
    /// implicitly: anything but a block, or a block holding exactly one
    /// expression statement.
    #[must_use]
    pub fn is_single_expression(&self) -> bool {
        match self {
            Self::Block { statements, .. } => {
                matches!(statements.as_slice(), [Statement::Expression { .. }])
            },
            _ => true,
        }
    }
}

/// Represents a named function definition, `name(a, b) = body`.
///
/// Evaluating the definition binds `name` to a closure over the current
/// scope.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// The body evaluated when the function is called.
    pub body:   Rc<Expr>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a statement.
///
/// Statements are the units parsed from input lines and the items a session
/// annotates.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A named function declaration.
    Function(FunctionDef),
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// A binding declaration using `let` (immutable) or `var` (mutable).
    VariableDeclaration {
        /// The name of the binding.
        name:    String,
        /// Whether the binding was introduced with `var`.
        mutable: bool,
        /// The initial value.
        value:   Expr,
        /// Line number in the source code.
        line:    usize,
    },
    /// A plain assignment `name = value`.
    Assignment {
        /// The name of the binding.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A compound assignment such as `x += 1`.
    CompoundAssignment {
        /// The name of the binding.
        name:  String,
        /// The binary operation applied to the current value.
        op:    BinaryOperator,
        /// The right-hand operand.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// Element or entry update, `name[index] = value`.
    IndexAssignment {
        /// The name of the collection binding.
        name:  String,
        /// Index or key expression.
        index: Expr,
        /// The new element value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `return` with an optional value.
    Return {
        /// The returned expression; `None` returns unit.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Function(def) => def.line,
            Self::Expression { line, .. }
            | Self::VariableDeclaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::CompoundAssignment { line, .. }
            | Self::IndexAssignment { line, .. }
            | Self::Return { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Checked addition or concatenation (`+`)
    Add,
    /// Checked subtraction (`-`)
    Sub,
    /// Checked multiplication (`*`)
    Mul,
    /// Checked division, truncating toward zero (`/`)
    Div,
    /// Checked remainder with the sign of the dividend (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Wrapping addition (`&+`)
    WrappingAdd,
    /// Wrapping subtraction (`&-`)
    WrappingSub,
    /// Wrapping multiplication (`&*`)
    WrappingMul,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical exclusive or (`xor`)
    Xor,
    /// Short-circuiting logical and (`and`)
    And,
    /// Short-circuiting logical or (`or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Checked arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

/// Context for a for-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ForExprContext {
    /// The loop variable name.
    pub var:       String,
    /// The range start, or the iterated collection when `end` is `None`.
    pub start:     Box<Expr>,
    /// The end expression for the loop range (if present).
    pub end:       Option<Box<Expr>>,
    /// The body of the loop to be evaluated for each iteration.
    pub body:      Box<Expr>,
    /// Whether the end value is included in the range.
    pub inclusive: bool,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub, WrappingAdd, WrappingMul, WrappingSub, Xor,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "^",
            WrappingAdd => "&+",
            WrappingSub => "&-",
            WrappingMul => "&*",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            Xor => "xor",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}
