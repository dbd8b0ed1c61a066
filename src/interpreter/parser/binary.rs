use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Folds a left-associative chain of operators at one precedence level.
///
/// `operand` parses the next-higher precedence level and `accepts` selects the
/// operators that belong to this level.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                           accepts: fn(BinaryOperator) -> bool)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;

    while let Some((token, line)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && accepts(op)
    {
        let line = *line;
        tokens.next();

        let right = operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }

    Ok(left)
}

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or`. Both operands must evaluate to
/// booleans and the right one is only evaluated when the left is `false`.
///
/// Grammar: `logical_or := xor ("or" xor)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_logical_xor, |op| op == BinaryOperator::Or)
}

/// Parses logical XOR expressions.
///
/// Precedence is between AND and OR.
///
/// Grammar: `xor := and ("xor" and)*`
pub fn parse_logical_xor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_logical_and, |op| op == BinaryOperator::Xor)
}

/// Parses logical AND expressions.
///
/// Grammar: `and := relational ("and" relational)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_relational, |op| op == BinaryOperator::And)
}

/// Parses relational and equality operators.
///
/// This level handles `<`, `>`, `<=`, `>=`, `==` and `!=`. Chains such as
/// `a < b < c` parse left-associatively and then fail at runtime because a
/// boolean cannot be ordered against a number.
///
/// Grammar: `relational := additive (rel_op additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_additive, is_relational_op)
}

/// Parses addition and subtraction expressions.
///
/// Handles the checked operators `+` and `-` as well as the wrapping
/// operators `&+` and `&-`.
///
/// Grammar: `additive := multiplicative (("+" | "-" | "&+" | "&-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_multiplicative, |op| {
        matches!(op,
                 BinaryOperator::Add
                 | BinaryOperator::Sub
                 | BinaryOperator::WrappingAdd
                 | BinaryOperator::WrappingSub)
    })
}

/// Parses multiplication-level expressions.
///
/// Handles `*`, `/`, `%` and the wrapping multiplication `&*`.
///
/// Grammar: `multiplicative := exponent (("*" | "/" | "%" | "&*") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_exponent, |op| {
        matches!(op,
                 BinaryOperator::Mul
                 | BinaryOperator::Div
                 | BinaryOperator::Mod
                 | BinaryOperator::WrappingMul)
    })
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`.
/// Unary operators bind tighter, so `-2 ^ 2` is `(-2) ^ 2`.
///
/// Grammar: `exponent := unary ("^" exponent)?`
///
/// # Example
/// ```
/// use slate::{
///     ast::{BinaryOperator, Expr, Statement},
///     interpreter::parser::parse_program,
/// };
///
/// let program = parse_program("2 ^ 3 ^ 2").unwrap();
/// let Statement::Expression { expr: Expr::BinaryOp { op, right, .. }, .. } = &program[0] else {
///     panic!("expected a binary expression");
/// };
/// assert_eq!(*op, BinaryOperator::Pow);
/// assert!(matches!(**right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
/// ```
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_unary(tokens)?;

    if let Some((Token::Caret, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_exponent(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(left),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(right),
                                   line });
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for every token that does not denote a binary operator.
/// Compound assignment tokens such as `+=` are statements, not operators, and
/// also map to `None`.
///
/// # Example
/// ```
/// use slate::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::WrappingStar),
///            Some(BinaryOperator::WrappingMul));
/// assert_eq!(token_to_binary_operator(&Token::PlusAssign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::WrappingPlus => Some(BinaryOperator::WrappingAdd),
        Token::WrappingMinus => Some(BinaryOperator::WrappingSub),
        Token::WrappingStar => Some(BinaryOperator::WrappingMul),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Xor => Some(BinaryOperator::Xor),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Maps a compound assignment token to the operator it applies.
///
/// `x += 1` is evaluated as `x = x + 1`, with the same checked semantics.
#[must_use]
pub const fn compound_assignment_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Sub),
        Token::MulAssign => Some(BinaryOperator::Mul),
        Token::DivAssign => Some(BinaryOperator::Div),
        Token::ModAssign => Some(BinaryOperator::Mod),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the relational class.
///
/// # Example
/// ```
/// use slate::{ast::BinaryOperator, interpreter::parser::binary::is_relational_op};
///
/// assert!(is_relational_op(BinaryOperator::Less));
/// assert!(is_relational_op(BinaryOperator::NotEqual));
/// assert!(!is_relational_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}
