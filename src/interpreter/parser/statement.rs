use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        evaluator::utils::is_reserved_identifier,
        lexer::Token,
        parser::{
            binary::compound_assignment_operator,
            core::{ParseResult, parse_expression},
            unary::parse_params,
            utils::{parse_binding_name, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a `return`, with or without a value.
/// - a `let` or `var` declaration.
/// - an index assignment `name[index] = value`.
/// - an assignment or compound assignment.
/// - a function definition `name(a, b) = body`.
/// - an expression used as a statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. If none match, the input is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some(statement) = parse_return(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_variable_declaration(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_index_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(statement);
    }
    if let Some(statement) = parse_function_definition(tokens)? {
        return Ok(statement);
    }

    let current_line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;

    Ok(Statement::Expression { expr,
                               line: current_line })
}

/// Parses `return` or `return <expression>`.
///
/// A bare `return` is recognised when the keyword is followed by a newline,
/// a closing brace, or the end of input.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Return, line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;
    tokens.next();

    let value = match tokens.peek() {
        None | Some((Token::NewLine | Token::RBrace, _)) => None,
        Some(_) => Some(parse_expression(tokens)?),
    };

    Ok(Some(Statement::Return { value, line }))
}

/// Parses a binding declaration.
///
/// A declaration has the form `let <identifier> = <expression>` for an
/// immutable binding or `var <identifier> = <expression>` for a mutable one.
///
/// The identifier must not be a builtin name.
///
/// If the next token is neither `let` nor `var`, this function returns
/// `Ok(None)` and does not consume any input.
///
/// # Errors
/// Returns a `ParseError` if the identifier is reserved, `=` is missing, or
/// the initializer is malformed.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (mutable, line) = match tokens.peek() {
        Some((Token::Let, line)) => (false, *line),
        Some((Token::Var, line)) => (true, *line),
        _ => return Ok(None),
    };
    tokens.next();

    let name = parse_binding_name(tokens, line)?;

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((tok, l)) => {
            return Err(ParseError::UnexpectedToken { token: format!("expected '=', found {tok:?}"),
                                                     line:  *l, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line });
        },
    }

    let value = parse_expression(tokens)?;
    Ok(Some(Statement::VariableDeclaration { name,
                                             mutable,
                                             value,
                                             line }))
}

/// Skips a balanced `open ... close` group whose opening token has already
/// been consumed, then returns the token that follows it.
fn token_after_group<'a, I>(lookahead: &mut I, open: &Token, close: &Token)
                            -> Option<&'a Token>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut depth = 1usize;
    while depth > 0 {
        let (tok, _) = lookahead.next()?;
        if tok == open {
            depth += 1;
        } else if tok == close {
            depth -= 1;
        }
    }
    lookahead.next().map(|(tok, _)| tok)
}

/// Parses `name[index] = value`.
///
/// The statement is recognised by lookahead: an identifier, a balanced
/// bracket group, and then `=`. Anything else, such as `xs[0] == 1`, is left
/// for expression parsing.
fn parse_index_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(name), line)) = tokens.peek() else {
        return Ok(None);
    };
    let (name, line) = (name.clone(), *line);

    let mut lookahead = tokens.clone();
    lookahead.next();
    if !matches!(lookahead.next(), Some((Token::LBracket, _))) {
        return Ok(None);
    }
    if token_after_group(&mut lookahead, &Token::LBracket, &Token::RBracket) != Some(&Token::Equals) {
        return Ok(None);
    }

    tokens.next();
    tokens.next();
    let index = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RBracket, _)) => {},
        _ => {
            return Err(ParseError::UnexpectedToken { token: "expected ']' after index".to_string(),
                                                     line });
        },
    }
    tokens.next();

    let value = parse_expression(tokens)?;
    Ok(Some(Statement::IndexAssignment { name,
                                         index,
                                         value,
                                         line }))
}

/// Parses an assignment or compound-assignment statement.
///
/// Supported forms:
///
/// - `<identifier> = <expression>`
/// - `<identifier> += <expression>`
/// - `<identifier> -= <expression>`
/// - `<identifier> *= <expression>`
/// - `<identifier> /= <expression>`
/// - `<identifier> %= <expression>`
///
/// The function performs a two-token lookahead and returns `Ok(None)` without
/// consuming anything when no assignment pattern matches.
///
/// # Errors
/// Returns a `ParseError` if the identifier is a builtin name or the assigned
/// expression fails to parse.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    let Some((Token::Identifier(name), _)) = lookahead.next() else {
        return Ok(None);
    };
    let Some((op_token, line)) = lookahead.next() else {
        return Ok(None);
    };
    let line = *line;

    let op = match op_token {
        Token::Equals => None,
        tok => match compound_assignment_operator(tok) {
            Some(op) => Some(op),
            None => return Ok(None),
        },
    };

    if is_reserved_identifier(name) {
        return Err(ParseError::IdentifierReserved { name: name.clone(),
                                                    line });
    }
    tokens.next();
    tokens.next();

    let value = parse_expression(tokens)?;
    let name = name.clone();

    Ok(Some(match op {
                None => Statement::Assignment { name, value, line },
                Some(op) => Statement::CompoundAssignment { name,
                                                            op,
                                                            value,
                                                            line },
            }))
}

/// Parses a function definition of the form
/// `<name>(param1, param2, ...) = <expression>`.
///
/// This function identifies a definition by checking:
/// 1. The next token is an identifier.
/// 2. It is immediately followed by `(`.
/// 3. A matching `)` exists.
/// 4. The token after the closing `)` is `=`.
///
/// When these conditions are met, the function name, parameter list, and body
/// expression are parsed and returned as a `Statement::Function`. Otherwise
/// nothing is consumed and `Ok(None)` is returned, so that calls such as
/// `f(1) == 2` fall through to expression parsing.
///
/// # Errors
/// Returns a `ParseError` if the name or a parameter is reserved, a parameter
/// is duplicated, or the body expression fails to parse.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Identifier(_), line)) = tokens.peek() else {
        return Ok(None);
    };
    let line = *line;

    let mut lookahead = tokens.clone();
    lookahead.next();
    if !matches!(lookahead.next(), Some((Token::LParen, _))) {
        return Ok(None);
    }
    if token_after_group(&mut lookahead, &Token::LParen, &Token::RParen) != Some(&Token::Equals) {
        return Ok(None);
    }

    let name = parse_identifier(tokens, line)?;
    if is_reserved_identifier(&name) {
        return Err(ParseError::IdentifierReserved { name, line });
    }
    tokens.next();

    let params = parse_params(tokens, &Token::RParen, line)?;
    tokens.next();

    let body = parse_expression(tokens)?;
    Ok(Some(Statement::Function(FunctionDef { name,
                                              params,
                                              body: Rc::new(body),
                                              line })))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        ast::{BinaryOperator, Expr},
        interpreter::parser::parse_program,
    };

    fn single(source: &str) -> Statement {
        let mut program = parse_program(source).unwrap();
        assert_eq!(program.len(), 1);
        program.remove(0)
    }

    #[test]
    fn declarations_record_mutability() {
        assert!(matches!(single("let x = 1"),
                         Statement::VariableDeclaration { mutable: false, .. }));
        assert!(matches!(single("var x = 1"),
                         Statement::VariableDeclaration { mutable: true, .. }));
    }

    #[test]
    fn compound_assignment_maps_to_operator() {
        assert!(matches!(single("x %= 3"),
                         Statement::CompoundAssignment { op: BinaryOperator::Mod, .. }));
    }

    #[test]
    fn index_assignment_versus_comparison() {
        assert!(matches!(single("xs[1 + 1] = 4"), Statement::IndexAssignment { .. }));
        assert!(matches!(single("xs[0] == 4"), Statement::Expression { .. }));
    }

    #[test]
    fn function_definition_versus_call() {
        let Statement::Function(def) = single("add(a, b) = a + b") else {
            panic!("expected a function definition");
        };
        assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);

        assert!(matches!(single("add(1, 2) == 3"),
                         Statement::Expression { expr: Expr::BinaryOp { .. }, .. }));
    }

    #[test]
    fn bare_and_valued_return() {
        assert!(matches!(single("return"), Statement::Return { value: None, .. }));
        assert!(matches!(single("return 1"), Statement::Return { value: Some(_), .. }));
    }

    #[test]
    fn builtin_names_cannot_be_bound() {
        assert!(matches!(parse_program("let print = 1"),
                         Err(ParseError::IdentifierReserved { .. })));
        assert!(matches!(parse_program("len(x) = 1"),
                         Err(ParseError::IdentifierReserved { .. })));
        assert!(matches!(parse_program("let f = |map| map"),
                         Err(ParseError::IdentifierReserved { .. })));
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        assert!(parse_program("f(a, a) = a").is_err());
    }

    #[test]
    fn statements_must_be_separated() {
        assert!(matches!(parse_program("1 2"), Err(ParseError::UnexpectedToken { .. })));
    }
}
