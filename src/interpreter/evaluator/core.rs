use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::function::call_function,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A pending piece of work in the tree walk.
enum Step<'a> {
    /// Schedules the node's operands, then the node itself.
    Enter(&'a Expr),
    /// Combines the operand values already on the stack.
    Apply(&'a Expr),
}

/// Evaluates an expression tree and returns its value.
///
/// The tree is walked depth first with an explicit work stack, so deep trees
/// need no recursion. A function call evaluates its argument subtree before
/// dispatching; any error raised by the argument is wrapped in
/// `FunctionArgument`, naming the function and the argument as written.
///
/// # Example
/// ```
/// use shuntcalc::{interpreter::evaluator::core::evaluate_expression, parse};
///
/// let expr = parse("3 + 5 * (2 - 4)").unwrap();
/// assert_eq!(evaluate_expression(&expr), Ok(-7.0));
/// ```
pub fn evaluate_expression(expr: &Expr) -> EvalResult<f64> {
    let mut steps = vec![Step::Enter(expr)];
    let mut values: Vec<f64> = Vec::new();
    // Calls whose argument is being evaluated, outermost first.
    let mut calls: Vec<(&str, &str)> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) => match node {
                Expr::Number { value, .. } => values.push(*value),
                Expr::UnaryOp { expr, .. } => {
                    steps.push(Step::Apply(node));
                    steps.push(Step::Enter(expr));
                },
                Expr::BinaryOp { left, right, .. } => {
                    steps.push(Step::Apply(node));
                    steps.push(Step::Enter(right));
                    steps.push(Step::Enter(left));
                },
                Expr::FunctionCall { name,
                                     argument,
                                     argument_text,
                                     .. } => {
                    calls.push((name.as_str(), argument_text.as_str()));
                    steps.push(Step::Apply(node));
                    steps.push(Step::Enter(argument));
                },
            },
            Step::Apply(node) => {
                if matches!(node, Expr::FunctionCall { .. }) {
                    calls.pop();
                }

                let value = apply(node, &mut values).map_err(|error| in_calls(error, &calls))?;
                values.push(value);
            },
        }
    }

    values.pop()
          .ok_or(RuntimeError::MalformedExpression { values: 0 })
}

/// Wraps `error` once for each call being evaluated, innermost first.
fn in_calls(error: RuntimeError, calls: &[(&str, &str)]) -> RuntimeError {
    calls.iter()
         .rev()
         .fold(error, |source, (name, argument)| source.in_argument(name, argument))
}

/// Applies one node to the values of its operands, popping them.
fn apply(node: &Expr, values: &mut Vec<f64>) -> EvalResult<f64> {
    let mut operand = || values.pop().ok_or(RuntimeError::MalformedExpression { values: 0 });

    match node {
        Expr::Number { value, .. } => Ok(*value),
        Expr::UnaryOp { op, .. } => Ok(eval_unary(*op, operand()?)),
        Expr::BinaryOp { op, position, .. } => {
            let right = operand()?;
            let left = operand()?;
            eval_binary(*op, left, right, *position)
        },
        Expr::FunctionCall { name, .. } => call_function(name, operand()?),
    }
}

/// Applies a unary operator to a value.
#[must_use]
pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
    match op {
        UnaryOperator::Negate => -value,
    }
}

/// Applies a binary operator to its operands.
///
/// Division checks for an exactly zero divisor before dividing.
///
/// # Example
/// ```
/// use shuntcalc::{
///     ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::eval_binary,
/// };
///
/// assert_eq!(eval_binary(BinaryOperator::Pow, 2.0, 10.0, 1), Ok(1024.0));
/// assert_eq!(eval_binary(BinaryOperator::Div, 5.0, 0.0, 1),
///            Err(RuntimeError::DivisionByZero { position: 1 }));
/// ```
pub fn eval_binary(op: BinaryOperator, left: f64, right: f64, position: usize) -> EvalResult<f64> {
    Ok(match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero { position });
            }
            left / right
        },
        BinaryOperator::Pow => left.powf(right),
    })
}
