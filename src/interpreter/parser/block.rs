use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect_statement_end, skip_newlines},
        },
    },
};

/// Parses a block expression delimited by braces.
///
/// A block consists of zero or more statements separated by newlines.
/// Parsing continues until a closing `}` token is encountered.
/// Leading and trailing newlines inside the block are ignored.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `line`: Line number of the opening brace.
///
/// # Errors
/// `UnexpectedEndOfInput` when the closing brace is missing.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        skip_newlines(tokens);

        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
            Some(_) => {},
        }

        statements.push(parse_statement(tokens)?);
        expect_statement_end(tokens, true)?;
    }

    Ok(Expr::Block { statements, line })
}
