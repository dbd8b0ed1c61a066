use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier, lexer::Token, parser::core::ParseResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, map literals, call argument
/// lists and closure parameter lists. It repeatedly calls `parse_item` to
/// parse one element, expecting either a comma, to continue the list, or the
/// specified closing token, to end it. Newlines between items are allowed.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    skip_newlines(tokens);
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        skip_newlines(tokens);
        items.push(parse_item(tokens)?);
        skip_newlines(tokens);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
/// This function does not check for reserved identifiers; see
/// [`parse_binding_name`].
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses an identifier that is about to be bound and rejects builtin names.
///
/// Used for `let`/`var` names, function names, parameters and loop variables.
pub(in crate::interpreter::parser) fn parse_binding_name<'a, I>(tokens: &mut Peekable<I>,
                                                                line: usize)
                                                                -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let name = parse_identifier(tokens, line)?;
    if is_reserved_identifier(&name) {
        return Err(ParseError::IdentifierReserved { name, line });
    }
    Ok(name)
}

/// Consumes any run of newline tokens.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((Token::NewLine, _)) = tokens.peek() {
        tokens.next();
    }
}

/// Checks that a statement is properly terminated.
///
/// A statement must be followed by a newline, the end of input, or, inside a
/// block, the closing brace. The terminator itself is not consumed except for
/// newlines.
///
/// # Errors
/// Returns `UnexpectedToken` when another token follows on the same line.
pub(in crate::interpreter::parser) fn expect_statement_end<'a, I>(tokens: &mut Peekable<I>,
                                                                  in_block: bool)
                                                                  -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        None => Ok(()),
        Some((Token::NewLine, _)) => {
            tokens.next();
            Ok(())
        },
        Some((Token::RBrace, _)) if in_block => Ok(()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected end of statement, found {tok:?}"),
                                              line:  *line, })
        },
    }
}
