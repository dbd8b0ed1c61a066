/// Expression entry point and conditional parsing.
///
/// Contains the top of the precedence hierarchy and the shared parse result
/// type.
pub mod core;

/// Unary, primary and postfix expression parsing.
///
/// Handles literals, identifiers, closures, grouping, collection literals,
/// loops, and the postfix call and index operators.
pub mod unary;

/// Binary operator parsing.
///
/// Implements one function per precedence level, from logical OR down to
/// exponentiation.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences used by `do`, `if`, `for` and
/// `while`.
pub mod block;

/// Utility functions for the parser.
///
/// Comma-separated lists, identifiers and statement terminators.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, assignments, function definitions, `return` and
/// expression statements.
pub mod statement;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::{statement::parse_statement, utils::expect_statement_end},
    },
};

/// Parses a complete program into its top-level statements.
///
/// The whole source is tokenized and parsed before anything is evaluated, so
/// a syntax error anywhere in the program is reported without running any of
/// it. Blank lines between statements are skipped.
///
/// # Errors
/// Returns the first lexical or syntactic error encountered.
///
/// # Example
/// ```
/// use slate::{ast::Statement, interpreter::parser::parse_program};
///
/// let program = parse_program("let x = 1\n\nx + 1").unwrap();
/// assert_eq!(program.len(), 2);
/// assert!(matches!(program[0], Statement::VariableDeclaration { .. }));
///
/// assert!(parse_program("let = 3").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        while let Some((Token::NewLine, _)) = iter.peek() {
            iter.next();
        }
        if iter.peek().is_none() {
            break;
        }
        statements.push(parse_statement(&mut iter)?);
        expect_statement_end(&mut iter, false)?;
    }

    Ok(statements)
}
