//! # shuntcalc
//!
//! shuntcalc is an arithmetic expression evaluator written in Rust.
//! It tokenizes an expression, reorders it into postfix form with the
//! Shunting Yard algorithm, and evaluates the result with support for
//! operator precedence, parentheses, unary minus and the functions `sin`,
//! `cos`, `tan` and `sqrt`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use log::debug;

use crate::{
    ast::Expr,
    error::{Error, ParseError},
    interpreter::{
        evaluator::postfix::{build_expression, evaluate_postfix},
        parser::core::to_postfix,
        tokenizer::{Token, format_tokens, tokenize},
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// an expression as a tree. Trees are folded out of postfix tokens and
/// traversed by the evaluator.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing,
/// reordering or evaluating an expression. Errors carry the position they
/// refer to, and errors from a function argument keep the failing argument.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (tokenizer, converter,
///   evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the evaluation pipeline.
///
/// This module ties together the lexer, tokenizer, infix-to-postfix converter
/// and evaluator.
pub mod interpreter;

/// Evaluates an arithmetic expression.
///
/// Whitespace is removed first, then the expression is tokenized, reordered
/// into postfix form and evaluated.
///
/// # Errors
/// Returns the first error raised by any stage. No partial result is
/// produced.
///
/// # Examples
/// ```
/// use shuntcalc::{
///     error::{Error, RuntimeError},
///     evaluate,
/// };
///
/// assert_eq!(evaluate("3 + 5 * (2 - 4)"), Ok(-7.0));
/// assert_eq!(evaluate("2^3^2"), Ok(512.0));
/// assert_eq!(evaluate("5/0"),
///            Err(Error::Runtime(RuntimeError::DivisionByZero { position: 1 })));
/// ```
pub fn evaluate(expression: &str) -> Result<f64, Error> {
    let postfix = postfix(expression)?;
    let value = evaluate_postfix(&postfix)?;

    debug!("{expression:?} evaluated to {value}");
    Ok(value)
}

/// Parses an expression into a tree without evaluating it.
///
/// # Example
/// ```
/// use shuntcalc::parse;
///
/// assert_eq!(parse("-2^2").unwrap().to_string(), "(-(2 ^ 2))");
/// assert_eq!(parse("1+2*3").unwrap().to_string(), "(1 + (2 * 3))");
/// ```
pub fn parse(expression: &str) -> Result<Expr, Error> {
    let postfix = postfix(expression)?;
    build_expression(&postfix)
}

/// Tokenizes an expression and reorders it into postfix form.
///
/// # Example
/// ```
/// use shuntcalc::{interpreter::tokenizer::format_tokens, postfix};
///
/// let tokens = postfix("sqrt(sin(0) + 1)").unwrap();
/// assert_eq!(format_tokens(&tokens), "0 sin 1 + sqrt");
/// ```
pub fn postfix(expression: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let compact = strip_whitespace(expression);

    let tokens = tokenize(&compact)?;
    debug!("tokens: {}", format_tokens(&tokens));

    let postfix = to_postfix(&tokens)?;
    debug!("postfix: {}", format_tokens(&postfix));

    Ok(postfix)
}

/// Removes every whitespace character, so `1 2` reads as `12`.
#[must_use]
pub fn strip_whitespace(expression: &str) -> String {
    expression.chars().filter(|c| !c.is_whitespace()).collect()
}
