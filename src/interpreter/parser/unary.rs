use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, ForExprContext, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_additive,
            block::parse_block,
            core::{ParseResult, parse_expression, parse_if},
            utils::{parse_binding_name, parse_comma_separated, skip_newlines},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary postfix*
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    // Every nested expression passes through here.
    ensure_sufficient_stack(|| {
        let op = match tokens.peek() {
            Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
            Some((Token::Bang, line)) => Some((UnaryOperator::Not, *line)),
            _ => None,
        };

        if let Some((op, line)) = op {
            tokens.next();
            let expr = parse_unary(tokens)?;
            return Ok(Expr::UnaryOp { op,
                                      expr: Box::new(expr),
                                      line });
        }

        let primary = parse_primary(tokens)?;
        parse_postfix(tokens, primary)
    })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - literals of every scalar type, and `()` for unit
/// - identifiers
/// - parenthesized expressions
/// - closures (`|a, b| body` and `|| body`)
/// - array literals (`[ ... ]`) and map literals (`{ key: value, ... }`)
/// - `do` blocks
/// - `if`, `for` and `while` expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression? ")"
///              | "|" params "|" expression
///              | "||" expression
///              | "[" elements "]"
///              | "{" entries "}"
///              | do_block
///              | if_expression
///              | for_expression
///              | while_expression
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Integer(n) => Ok(literal(*n, line)),
        Token::Float(n) => Ok(literal(*n, line)),
        Token::Bool(b) => Ok(literal(*b, line)),
        Token::Str(s) => Ok(literal(s.as_str(), line)),
        Token::Char(c) => Ok(literal(*c, line)),
        Token::Identifier(name) => Ok(Expr::Variable { name: name.clone(),
                                                       line }),
        Token::LParen => parse_grouping(tokens, line),
        Token::Pipe => parse_closure(tokens, line),
        Token::DoublePipe => {
            let body = parse_expression(tokens)?;
            Ok(Expr::Closure { params: Vec::new(),
                               body: Rc::new(body),
                               line })
        },
        Token::Do => parse_braced_block(tokens, line),
        Token::LBracket => {
            let elements =
                parse_comma_separated(tokens, parse_expression, &Token::RBracket, line)?;
            Ok(Expr::ArrayLiteral { elements, line })
        },
        Token::LBrace => {
            let entries = parse_comma_separated(tokens, parse_map_entry, &Token::RBrace, line)?;
            Ok(Expr::MapLiteral { entries, line })
        },
        Token::If => parse_if(tokens, line),
        Token::For => parse_for_expression(tokens, line),
        Token::While => parse_while_expression(tokens, line),
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

fn literal(value: impl Into<LiteralValue>, line: usize) -> Expr {
    Expr::Literal { value: value.into(),
                    line }
}

/// Parses postfix operators applied to an expression.
///
/// Two postfix forms exist and may be chained freely:
///
/// 1. **Calls** `expr(arg1, arg2)`; the callee may be any expression, so
///    curried applications such as `f(1)(2)(3)` are ordinary chained calls.
/// 2. **Indexing** `expr[index]`, as in `grid[0][1]`.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "(" arguments ")"
///              | postfix "[" expression "]"
/// ```
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LParen, line)) => {
                let line = *line;
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen, line)?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    line };
            },
            Some((Token::LBracket, line)) => {
                let line = *line;
                tokens.next();
                let index = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RBracket, _)) => {
                        node = Expr::Index { target: Box::new(node),
                                             index: Box::new(index),
                                             line };
                    },
                    _ => {
                        return Err(ParseError::UnexpectedToken { token: "expected ']' after index".to_string(),
                                                                 line });
                    },
                }
            },
            _ => break,
        }
    }
    Ok(node)
}

/// Parses a parenthesized expression, or `()` for the unit value.
///
/// Grammar `grouping := "(" expression? ")"`
///
/// # Errors
/// `ExpectedClosingParen` when the closing parenthesis is missing.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(literal(LiteralValue::Unit, line));
    }

    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a closure after its opening `|`.
///
/// Parameters are distinct, non-reserved identifiers. The body is a single
/// expression; use a `do` block for several statements.
///
/// Grammar `closure := "|" identifier ("," identifier)* "|" expression`
fn parse_closure<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let params = parse_params(tokens, &Token::Pipe, line)?;
    let body = parse_expression(tokens)?;

    Ok(Expr::Closure { params,
                       body: Rc::new(body),
                       line })
}

/// Parses a parameter list up to `closing` and rejects duplicate names.
pub(in crate::interpreter::parser) fn parse_params<'a, I>(tokens: &mut Peekable<I>,
                                                          closing: &Token,
                                                          line: usize)
                                                          -> ParseResult<Vec<String>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let params = parse_comma_separated(tokens, |t| parse_binding_name(t, line), closing, line)?;

    for (i, name) in params.iter().enumerate() {
        if params[..i].contains(name) {
            return Err(ParseError::UnexpectedToken { token: format!("duplicate parameter '{name}'"),
                                                     line });
        }
    }

    Ok(params)
}

/// Parses one `key: value` entry of a map literal.
fn parse_map_entry<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(Expr, Expr)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let key = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::Colon, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("expected ':' after map key, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: key.line_number() }),
    }
    skip_newlines(tokens);
    let value = parse_expression(tokens)?;
    Ok((key, value))
}

/// Parses the `{ ... }` that follows a `do` keyword which has already been
/// consumed.
fn parse_braced_block<'a, I>(tokens: &mut Peekable<I>, do_line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::LBrace, line)) => parse_block(tokens, *line),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected '{{' after 'do', found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: do_line }),
    }
}

/// Parses a `do { ... }` block expression.
///
/// Expected structure: `do { statements }`
///
/// The function consumes the `do` keyword, requires a `{`, and then delegates
/// to `parse_block` to parse the inner statements until the matching `}`.
///
/// # Errors
/// Returns a `ParseError` if `do` is missing, `{` does not follow `do`, or the
/// block is malformed or ends unexpectedly.
pub fn parse_do_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Do, line)) => parse_braced_block(tokens, *line),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("expected 'do', found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a `for` expression after its keyword.
///
/// Supported forms:
///
/// - for x in start .. end     do { ... }
/// - for x in start ..= end    do { ... }
/// - for x in collection       do { ... }
///
/// Range bounds are additive expressions, so `for i in 0..n - 1` works as
/// expected. A collection may be an array, a string or a map.
///
/// # Errors
/// Returns a `ParseError` if the loop variable is missing or reserved, `in`
/// is missing, or the body does not start with `do`.
fn parse_for_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let var = parse_binding_name(tokens, line)?;

    match tokens.next() {
        Some((Token::In, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken { token: "expected 'in' after loop variable".to_string(),
                                                     line });
        },
    }

    let start = parse_additive(tokens)?;
    let (inclusive, end) = match tokens.peek() {
        Some((Token::DotDot, _)) => {
            tokens.next();
            (false, Some(Box::new(parse_additive(tokens)?)))
        },
        Some((Token::DotDotEq, _)) => {
            tokens.next();
            (true, Some(Box::new(parse_additive(tokens)?)))
        },
        _ => (false, None),
    };

    let body = parse_do_block(tokens)?;

    Ok(Expr::ForExpr { context: ForExprContext { var,
                                                 start: Box::new(start),
                                                 end,
                                                 body: Box::new(body),
                                                 inclusive },
                       line })
}

/// Parses `while <condition> do { ... }` after its keyword.
fn parse_while_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens)?;
    let body = parse_do_block(tokens)?;

    Ok(Expr::WhileExpr { condition: Box::new(condition),
                         body: Box::new(body),
                         line })
}
