use logos::Logos;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`, `.5`, `2.0` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens such as `"hello\n"`, escapes decoded.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// Character literal tokens such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\\n]|\\.)'", parse_char)]
    Char(char),
    /// `let`
    #[token("let")]
    Let,
    /// `var`
    #[token("var")]
    Var,
    /// `do`
    #[token("do")]
    Do,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `in`
    #[token("in")]
    In,
    /// `while`
    #[token("while")]
    While,
    /// `return`
    #[token("return")]
    Return,
    /// `xor`
    #[token("xor")]
    Xor,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; binding or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `..=`
    #[token("..=")]
    DotDotEq,
    /// `..`
    #[token("..")]
    DotDot,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `%=`
    #[token("%=")]
    ModAssign,
    /// `&+`
    #[token("&+")]
    WrappingPlus,
    /// `&-`
    #[token("&-")]
    WrappingMinus,
    /// `&*`
    #[token("&*")]
    WrappingStar,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `||`, the parameter list of a closure without parameters.
    #[token("||")]
    DoublePipe,
    /// `|`
    #[token("|")]
    Pipe,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,

    /// Line breaks separate statements.
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit into an `i64` fail to lex.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Strips the quotes from a string literal and decodes its escapes.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    unescape(&slice[1..slice.len() - 1])
}

/// Decodes a character literal; the decoded body must be exactly one `char`.
fn parse_char(lex: &logos::Lexer<Token>) -> Option<char> {
    let slice = lex.slice();
    let decoded = unescape(&slice[1..slice.len() - 1])?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Decodes the escape sequences `\n`, `\t`, `\r`, `\0`, `\\`, `\"` and `\'`.
///
/// Returns `None` for any other escape.
///
/// # Example
/// ```
/// use slate::interpreter::lexer::unescape;
///
/// assert_eq!(unescape(r"a\tb").as_deref(), Some("a\tb"));
/// assert_eq!(unescape(r"\q"), None);
/// ```
#[must_use]
pub fn unescape(body: &str) -> Option<String> {
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        decoded.push(match chars.next()? {
                         'n' => '\n',
                         't' => '\t',
                         'r' => '\r',
                         '0' => '\0',
                         '\\' => '\\',
                         '"' => '"',
                         '\'' => '\'',
                         _ => return None,
                     });
    }

    Some(decoded)
}

/// Tokenizes `source` into `(Token, line)` pairs.
///
/// Numeric slices that fail to lex (for example integers that do not fit
/// into an `i64`) and malformed string or character literals are reported as
/// invalid literals; every other unrecognized slice is an unexpected token.
///
/// # Example
/// ```
/// use slate::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1\nx").unwrap();
/// assert_eq!(tokens[0], (Token::Let, 1));
/// assert_eq!(tokens.last(), Some(&(Token::Identifier("x".into()), 2)));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, crate::error::ParseError> {
    use crate::error::ParseError;

    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::NewLine) => tokens.push((Token::NewLine, lexer.extras.line - 1)),
            Ok(tok) => tokens.push((tok, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();
                let is_literal =
                    slice.starts_with(|c: char| c.is_ascii_digit() || c == '"' || c == '\'');
                return Err(if is_literal {
                               ParseError::InvalidLiteral { literal: slice.to_string(),
                                                            line:    lexer.extras.line, }
                           } else {
                               ParseError::UnexpectedToken { token: slice.to_string(),
                                                             line:  lexer.extras.line, }
                           });
            },
        }
    }

    Ok(tokens)
}
