use std::ops::Range;

use log::trace;
use logos::Logos;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::ParseError,
    interpreter::{evaluator::function::Builtin, lexer::RawToken},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// An operator token: either a binary operator or a prefix unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// An infix operator taking two operands.
    Binary(BinaryOperator),
    /// A prefix operator taking one operand.
    Unary(UnaryOperator),
}

/// A semantic unit of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal.
    Number(f64),
    /// An operator.
    Operator(Operator),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// A call to a built-in function. The tokens of the argument follow this
    /// token, starting with the call's `(`.
    Function {
        /// The function name.
        name:     String,
        /// The argument exactly as written between the parentheses.
        argument: String,
    },
}

impl Token {
    /// Returns the range of the input covered by a function's argument, if
    /// this token is a function starting at `position`.
    #[must_use]
    pub fn argument_span(&self, position: usize) -> Option<Range<usize>> {
        match self {
            Self::Function { name, argument } => {
                let start = position + name.len() + 1;
                Some(start..start + argument.len())
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Operator(Operator::Binary(op)) => write!(f, "{op}"),
            Self::Operator(Operator::Unary(op)) => write!(f, "{op}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Function { name, .. } => write!(f, "{name}"),
        }
    }
}

/// Converts a whitespace-free expression into tokens paired with their
/// positions.
///
/// Digit and decimal-point runs become numbers. A built-in function name
/// directly followed by `(` becomes a [`Token::Function`] carrying its raw
/// argument; the argument itself is tokenized in place right after it. A `-`
/// at the start of the input or right after an operator or `(` is a unary
/// negation, any other `-` is a subtraction.
///
/// # Errors
/// - `InvalidCharacter` for characters that start no token, and for names
///   that are not a built-in function followed by `(`.
/// - `InvalidToken` for digit runs that are not numbers, such as `1.2.3`.
/// - `UnmatchedFunctionParens` when a function's `(` is never closed.
///
/// An error inside a function's argument is wrapped in `FunctionArgument`
/// once per enclosing call, innermost first.
///
/// # Example
/// ```
/// use shuntcalc::interpreter::tokenizer::{Token, tokenize};
///
/// let tokens = tokenize("sqrt(4)").unwrap();
///
/// assert_eq!(tokens[0],
///            (Token::Function { name:     "sqrt".to_string(),
///                               argument: "4".to_string(), },
///             0));
/// assert_eq!(tokens[1], (Token::LeftParen, 4));
/// assert_eq!(tokens[2], (Token::Number(4.0), 5));
/// ```
pub fn tokenize(input: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    // Indices of the function tokens whose argument is still being read.
    let mut open_calls: Vec<usize> = Vec::new();
    let mut lexer = RawToken::lexer(input);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let position = span.start;

        open_calls.retain(|&call| {
                      let (token, start) = &tokens[call];
                      token.argument_span(*start)
                           .is_some_and(|argument| position < argument.end)
                  });

        let token = read_token(input, raw.ok(), span, tokens.last())
            .map_err(|error| in_open_calls(error, &tokens, &open_calls))?;

        if matches!(token, Token::Function { .. }) {
            open_calls.push(tokens.len());
        }
        tokens.push((token, position));
    }

    trace!("tokenized {input:?} into {} tokens", tokens.len());
    Ok(tokens)
}

/// Turns one lexeme into a token. `previous` is the token before it.
fn read_token(input: &str,
              raw: Option<RawToken>,
              span: Range<usize>,
              previous: Option<&(Token, usize)>)
              -> ParseResult<Token> {
    let position = span.start;
    let slice = &input[span.clone()];

    let Some(raw) = raw else {
        return Err(invalid_character(input, position));
    };

    Ok(match raw {
        RawToken::Number => {
            let value = slice.parse::<f64>()
                             .map_err(|_| ParseError::InvalidToken { token:    slice.to_string(),
                                                                     position, })?;
            Token::Number(value)
        },
        RawToken::Identifier => function_token(input, slice, span)?,
        RawToken::LParen => Token::LeftParen,
        RawToken::RParen => Token::RightParen,
        RawToken::Minus if expects_operand(previous) => {
            Token::Operator(Operator::Unary(UnaryOperator::Negate))
        },
        RawToken::Plus | RawToken::Minus | RawToken::Star | RawToken::Slash | RawToken::Caret => {
            let op = raw.operator_symbol()
                        .and_then(BinaryOperator::from_symbol)
                        .ok_or_else(|| ParseError::InvalidToken { token:    slice.to_string(),
                                                                  position, })?;
            Token::Operator(Operator::Binary(op))
        },
    })
}

/// Wraps `error` in the arguments of every open call, innermost first.
fn in_open_calls(error: ParseError,
                 tokens: &[(Token, usize)],
                 open_calls: &[usize])
                 -> ParseError {
    open_calls.iter()
              .rev()
              .fold(error, |source, &call| match &tokens[call].0 {
                  Token::Function { name, argument } => source.in_argument(name, argument),
                  _ => source,
              })
}

/// Formats a token sequence as space separated text, e.g. `2 3 4 * +`.
#[must_use]
pub fn format_tokens(tokens: &[(Token, usize)]) -> String {
    tokens.iter()
          .map(|(token, _)| token.to_string())
          .collect::<Vec<_>>()
          .join(" ")
}

/// Whether the next token has to start an operand, which makes a `-` unary.
fn expects_operand(previous: Option<&(Token, usize)>) -> bool {
    matches!(previous,
             None | Some((Token::Operator(_) | Token::LeftParen | Token::Function { .. }, _)))
}

/// Builds the token for an identifier, which must be a built-in function
/// immediately followed by its parenthesized argument.
fn function_token(input: &str, name: &str, span: Range<usize>) -> ParseResult<Token> {
    if !Builtin::is_builtin(name) || !input[span.end..].starts_with('(') {
        return Err(invalid_character(input, span.start));
    }

    let argument = matching_paren(input, span.end).ok_or_else(|| {
                       ParseError::UnmatchedFunctionParens { name:     name.to_string(),
                                                             position: span.start, }
                   })?;

    Ok(Token::Function { name:     name.to_string(),
                         argument: input[argument].to_string(), })
}

/// Scans forward from the `(` at `open` and returns the range between it and
/// its matching `)`.
fn matching_paren(input: &str, open: usize) -> Option<Range<usize>> {
    let mut depth = 0usize;

    for (offset, byte) in input.bytes().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1..offset);
                }
            },
            _ => {},
        }
    }

    None
}

fn invalid_character(input: &str, position: usize) -> ParseError {
    ParseError::InvalidCharacter { character: input[position..].chars().next().unwrap_or_default(),
                                   position }
}
