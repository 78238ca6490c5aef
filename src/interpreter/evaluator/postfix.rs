use std::cmp::Reverse;

use log::trace;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            core::{EvalResult, eval_binary, eval_unary},
            function::call_function,
        },
        tokenizer::{Operator, Token},
    },
};

/// What a postfix fold makes of each token.
trait Fold {
    type Value;

    fn number(value: f64, position: usize) -> Self::Value;

    fn unary(op: UnaryOperator, operand: Self::Value, position: usize) -> EvalResult<Self::Value>;

    fn binary(op: BinaryOperator,
              left: Self::Value,
              right: Self::Value,
              position: usize)
              -> EvalResult<Self::Value>;

    fn call(name: &str,
            argument_text: &str,
            argument: Self::Value,
            position: usize)
            -> EvalResult<Self::Value>;
}

/// Folds straight into numbers.
struct Values;

impl Fold for Values {
    type Value = f64;

    fn number(value: f64, _: usize) -> f64 {
        value
    }

    fn unary(op: UnaryOperator, operand: f64, _: usize) -> EvalResult<f64> {
        Ok(eval_unary(op, operand))
    }

    fn binary(op: BinaryOperator, left: f64, right: f64, position: usize) -> EvalResult<f64> {
        eval_binary(op, left, right, position)
    }

    fn call(name: &str, _: &str, argument: f64, _: usize) -> EvalResult<f64> {
        call_function(name, argument)
    }
}

/// Folds into an expression tree.
struct Nodes;

impl Fold for Nodes {
    type Value = Expr;

    fn number(value: f64, position: usize) -> Expr {
        Expr::Number { value, position }
    }

    fn unary(op: UnaryOperator, operand: Expr, position: usize) -> EvalResult<Expr> {
        Ok(Expr::UnaryOp { op,
                           expr: Box::new(operand),
                           position })
    }

    fn binary(op: BinaryOperator, left: Expr, right: Expr, position: usize) -> EvalResult<Expr> {
        Ok(Expr::BinaryOp { left: Box::new(left),
                            op,
                            right: Box::new(right),
                            position })
    }

    fn call(name: &str, argument_text: &str, argument: Expr, position: usize) -> EvalResult<Expr> {
        Ok(Expr::FunctionCall { name: name.to_string(),
                                argument: Box::new(argument),
                                argument_text: argument_text.to_string(),
                                position })
    }
}

/// The argument of one function call, as seen from the postfix sequence.
#[derive(Debug, Clone, Copy)]
struct ArgumentScope<'a> {
    name:     &'a str,
    argument: &'a str,
    /// Index of the function token.
    function: usize,
    /// Index of the first token of the argument. Equals `function` for an
    /// empty argument.
    start:    usize,
}

/// Evaluates a postfix sequence.
///
/// Values are computed on a stack as the tokens are read, so long
/// expressions need no recursion. Each function argument is folded as an
/// expression of its own: it may only use values it produced and must leave
/// exactly one.
///
/// # Errors
/// - `InsufficientOperands` when an operator or function finds too few
///   values.
/// - `MalformedExpression` when the whole sequence, or a function argument,
///   does not leave exactly one value.
/// - `DivisionByZero` and `UnsupportedFunction` from evaluating a token.
/// - `InvalidToken` for parentheses, which never appear in postfix.
///
/// An error inside a function argument is wrapped in `FunctionArgument` for
/// every enclosing call, innermost first.
///
/// # Example
/// ```
/// use shuntcalc::{
///     ast::BinaryOperator,
///     error::{Error, RuntimeError},
///     interpreter::{
///         evaluator::postfix::evaluate_postfix,
///         tokenizer::{Operator, Token},
///     },
/// };
///
/// let postfix = [(Token::Number(2.0), 0),
///                (Token::Number(3.0), 2),
///                (Token::Operator(Operator::Binary(BinaryOperator::Mul)), 1)];
/// assert_eq!(evaluate_postfix(&postfix), Ok(6.0));
///
/// let bare = [(Token::Operator(Operator::Binary(BinaryOperator::Add)), 0)];
/// assert_eq!(evaluate_postfix(&bare),
///            Err(Error::Runtime(RuntimeError::InsufficientOperands { operator: "+".to_string(),
///                                                                    position: 0, })));
/// ```
pub fn evaluate_postfix(postfix: &[(Token, usize)]) -> Result<f64, Error> {
    fold::<Values>(postfix)
}

/// Folds a postfix sequence into an expression tree.
///
/// Works like [`evaluate_postfix`] with tree nodes on the stack instead of
/// numbers: operators and functions pop their operands and push the node
/// combining them. For a binary operator the first value popped is the right
/// operand. Nothing is evaluated, so `DivisionByZero` is left to
/// [`evaluate_expression`](crate::interpreter::evaluator::core::evaluate_expression).
///
/// # Errors
/// As [`evaluate_postfix`], without the evaluation errors.
pub fn build_expression(postfix: &[(Token, usize)]) -> Result<Expr, Error> {
    let expr = fold::<Nodes>(postfix)?;
    trace!("folded postfix into a tree of depth {}", expr.depth());
    Ok(expr)
}

fn fold<F: Fold>(postfix: &[(Token, usize)]) -> Result<F::Value, Error> {
    let scopes = argument_scopes(postfix);
    let mut pending = scopes.iter().peekable();
    // Arguments being folded, outermost first, with the stack height at
    // which each started.
    let mut open: Vec<(ArgumentScope<'_>, usize)> = Vec::new();
    let mut stack: Vec<F::Value> = Vec::with_capacity(postfix.len());

    for (index, (token, position)) in postfix.iter().enumerate() {
        let position = *position;

        while let Some(scope) = pending.next_if(|scope| scope.start == index) {
            open.push((*scope, stack.len()));
        }
        let base = open.last().map_or(0, |(_, base)| *base);

        let value = match token {
            Token::Number(value) => Ok(F::number(*value, position)),
            Token::Operator(Operator::Unary(op)) => {
                let Some(operand) = pop_above(&mut stack, base) else {
                    return Err(insufficient(token, position, &open).into());
                };
                F::unary(*op, operand, position)
            },
            Token::Operator(Operator::Binary(op)) => {
                let (Some(right), Some(left)) =
                    (pop_above(&mut stack, base), pop_above(&mut stack, base))
                else {
                    return Err(insufficient(token, position, &open).into());
                };
                F::binary(*op, left, right, position)
            },
            Token::Function { name, argument } => {
                if let Some(at) = open.iter().rposition(|(scope, _)| scope.function == index) {
                    let values = stack.len().saturating_sub(open[at].1);
                    if values != 1 {
                        let error = RuntimeError::MalformedExpression { values };
                        return Err(in_arguments(error, &open[..=at]).into());
                    }
                    open.truncate(at);
                }

                let base = open.last().map_or(0, |(_, base)| *base);
                let Some(operand) = pop_above(&mut stack, base) else {
                    return Err(insufficient(token, position, &open).into());
                };
                F::call(name, argument, operand, position)
            },
            Token::LeftParen | Token::RightParen => {
                return Err(ParseError::InvalidToken { token: token.to_string(),
                                                      position }.into());
            },
        };

        stack.push(value.map_err(|error| in_arguments(error, &open))?);
    }

    let values = stack.len();
    match stack.pop() {
        Some(value) if values == 1 => Ok(value),
        _ => Err(RuntimeError::MalformedExpression { values }.into()),
    }
}

/// Finds where each function's argument starts in the postfix sequence.
///
/// The converter outputs an argument as one run of tokens right before its
/// function, so the argument is the run of preceding tokens that lie inside
/// the call's parentheses. Scopes are ordered by start, outer calls first.
fn argument_scopes(postfix: &[(Token, usize)]) -> Vec<ArgumentScope<'_>> {
    let mut scopes: Vec<ArgumentScope<'_>> =
        postfix.iter()
               .enumerate()
               .filter_map(|(function, (token, position))| {
                   let Token::Function { name, argument } = token else {
                       return None;
                   };
                   let span = token.argument_span(*position)?;
                   let length = postfix[..function].iter()
                                                   .rev()
                                                   .take_while(|(_, inner)| span.contains(inner))
                                                   .count();

                   Some(ArgumentScope { name,
                                        argument,
                                        function,
                                        start: function - length })
               })
               .collect();

    scopes.sort_by_key(|scope| (scope.start, Reverse(scope.function)));
    scopes
}

/// Pops a value, unless the current argument has none left.
fn pop_above<T>(stack: &mut Vec<T>, base: usize) -> Option<T> {
    if stack.len() > base { stack.pop() } else { None }
}

fn insufficient(token: &Token,
                position: usize,
                open: &[(ArgumentScope<'_>, usize)])
                -> RuntimeError {
    let error = RuntimeError::InsufficientOperands { operator: token.to_string(),
                                                     position };
    in_arguments(error, open)
}

/// Wraps `error` once for each open argument, innermost first.
fn in_arguments(error: RuntimeError, open: &[(ArgumentScope<'_>, usize)]) -> RuntimeError {
    open.iter()
        .rev()
        .fold(error, |source, (scope, _)| source.in_argument(scope.name, scope.argument))
}
