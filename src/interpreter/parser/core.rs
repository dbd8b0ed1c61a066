use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_logical_or, unary::parse_do_block},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses an expression, starting at the loosest binding operator (`or`).
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}

/// Parses the rest of an `if` expression once the `if` keyword is consumed.
///
/// ```text
/// if <condition> do { ... } else if <condition> do { ... } else do { ... }
/// ```
///
/// # Errors
/// `UnexpectedToken` when a branch does not start with `do`, or `else` is
/// followed by neither `if` nor `do`.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;
    if !matches!(tokens.peek(), Some((Token::Do, _))) {
        return Err(ParseError::UnexpectedToken { token: "expected 'do' after the if condition".to_string(),
                                                 line });
    }
    let then_branch = parse_do_block(tokens)?;

    let else_branch = if matches!(tokens.peek(), Some((Token::Else, _))) {
        tokens.next();
        Some(Box::new(parse_else(tokens, line)?))
    } else {
        None
    };

    Ok(Expr::IfExpr { condition: Box::new(condition),
                      then_branch: Box::new(then_branch),
                      else_branch,
                      line })
}

/// `else` is followed by a chained `if` or a final `do` block.
fn parse_else<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::If, if_line)) => {
            let if_line = *if_line;
            tokens.next();
            parse_if(tokens, if_line)
        },
        Some((Token::Do, _)) => parse_do_block(tokens),
        _ => Err(ParseError::UnexpectedToken { token: "expected 'if' or 'do' after else".to_string(),
                                               line }),
    }
}
