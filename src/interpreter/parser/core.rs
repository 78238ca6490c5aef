use log::trace;

use crate::{
    error::ParseError,
    interpreter::tokenizer::{ParseResult, Token},
};

/// Reorders infix tokens into postfix (Reverse Polish) order using the
/// Shunting Yard algorithm.
///
/// - Numbers go straight to the output.
/// - Functions, prefix operators and `(` are pushed onto the operator stack.
/// - A binary operator first pops every stacked operator that binds at least
///   as tightly (strictly tighter for right-associative operators), stopping
///   at `(` and functions.
/// - `)` pops up to its `(` and discards it; a function waiting below is
///   output too, attaching it to its argument.
///
/// Positions travel with their tokens.
///
/// # Errors
/// `MismatchedParentheses` for a `)` with no open `(` and for a `(` still
/// open at the end of input.
///
/// # Example
/// ```
/// use shuntcalc::interpreter::{
///     parser::core::to_postfix,
///     tokenizer::{format_tokens, tokenize},
/// };
///
/// let tokens = tokenize("3+5*(2-4)").unwrap();
/// let postfix = to_postfix(&tokens).unwrap();
///
/// assert_eq!(format_tokens(&postfix), "3 5 2 4 - * +");
/// ```
pub fn to_postfix(tokens: &[(Token, usize)]) -> ParseResult<Vec<(Token, usize)>> {
    let mut output: Vec<(Token, usize)> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<(Token, usize)> = Vec::new();

    for (token, position) in tokens {
        match token {
            Token::Number(_) => output.push((token.clone(), *position)),

            Token::Function { .. } | Token::LeftParen => stack.push((token.clone(), *position)),

            Token::Operator(op) if op.is_prefix() => stack.push((token.clone(), *position)),

            Token::Operator(op) => {
                while let Some((Token::Operator(top), _)) = stack.last()
                      && op.yields_to(*top)
                {
                    output.extend(stack.pop());
                }
                stack.push((token.clone(), *position));
            },

            Token::RightParen => {
                loop {
                    match stack.pop() {
                        Some((Token::LeftParen, _)) => break,
                        Some(entry) => output.push(entry),
                        None => {
                            return Err(ParseError::MismatchedParentheses { position: *position });
                        },
                    }
                }

                if let Some((Token::Function { .. }, _)) = stack.last() {
                    output.extend(stack.pop());
                }
            },
        }
    }

    while let Some((token, position)) = stack.pop() {
        if matches!(token, Token::LeftParen) {
            return Err(ParseError::MismatchedParentheses { position });
        }
        output.push((token, position));
    }

    trace!("reordered {} tokens into postfix", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::tokenizer::{format_tokens, tokenize};

    fn postfix(input: &str) -> String {
        format_tokens(&to_postfix(&tokenize(input).unwrap()).unwrap())
    }

    #[test]
    fn precedence_orders_operators() {
        assert_eq!(postfix("1+2*3"), "1 2 3 * +");
        assert_eq!(postfix("1*2+3"), "1 2 * 3 +");
        assert_eq!(postfix("8/4/2"), "8 4 / 2 /");
        assert_eq!(postfix("8-4+2"), "8 4 - 2 +");
    }

    #[test]
    fn exponent_is_right_associative() {
        assert_eq!(postfix("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(postfix("2*3^2"), "2 3 2 ^ *");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(postfix("(1+2)*3"), "1 2 + 3 *");
        assert_eq!(postfix("((4))"), "4");
    }

    #[test]
    fn functions_follow_their_argument() {
        assert_eq!(postfix("sqrt(sin(0)+1)"), "0 sin 1 + sqrt");
        assert_eq!(postfix("2*cos(1)^2"), "2 1 cos 2 ^ *");
    }

    #[test]
    fn negation_binds_below_exponent() {
        assert_eq!(postfix("-2^2"), "2 2 ^ neg");
        assert_eq!(postfix("-2*3"), "2 neg 3 *");
        assert_eq!(postfix("2^-1"), "2 1 neg ^");
    }

    #[test]
    fn unbalanced_parentheses() {
        let open = to_postfix(&tokenize("(2+3").unwrap());
        let close = to_postfix(&tokenize("2+3)").unwrap());

        assert_eq!(open, Err(ParseError::MismatchedParentheses { position: 0 }));
        assert_eq!(close, Err(ParseError::MismatchedParentheses { position: 3 }));
    }
}
