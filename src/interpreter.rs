/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs checked arithmetic, calls closures and builtins, and manages
/// bindings through [`environment::Environment`].
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Creates closures and applies them, including curried chains.
/// - Reports runtime errors such as division by zero or overflow.
pub mod evaluator;
/// The environment module implements scoped bindings.
///
/// Scopes are reference counted and shared with the closures created in
/// them, which gives closures capture-by-reference semantics.
pub mod environment;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source line.
/// - Decodes numeric, string and character literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar, reporting errors with line information.
/// - Rejects bindings that would shadow builtin functions.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// numbers, booleans, strings, characters, arrays, maps, closures and unit.
pub mod value;
