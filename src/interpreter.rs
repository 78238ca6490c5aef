/// The evaluator module computes results.
///
/// The evaluator folds postfix tokens into an expression tree with a value
/// stack and evaluates the tree, dispatching calls to built-in functions.
///
/// # Responsibilities
/// - Detects missing operands and leftover values.
/// - Applies arithmetic operators and built-in functions.
/// - Reports runtime errors such as division by zero, with the function
///   argument they came from.
pub mod evaluator;
/// The lexer module splits source text into raw lexemes.
///
/// The lexer reads the whitespace-free expression and produces digit runs,
/// identifiers, operators and parentheses. It does not interpret them.
pub mod lexer;
/// The parser module reorders tokens from infix to postfix.
///
/// # Responsibilities
/// - Holds the operator table of precedences and associativities.
/// - Runs the Shunting Yard algorithm, attaching functions to their argument.
/// - Reports unbalanced parentheses.
pub mod parser;
/// The tokenizer module turns lexemes into tokens.
///
/// # Responsibilities
/// - Parses numbers and rejects malformed ones.
/// - Recognizes built-in function calls and checks their parentheses.
/// - Tells unary minus from subtraction.
pub mod tokenizer;
