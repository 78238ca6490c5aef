/// The infix-to-postfix converter.
///
/// Implements the Shunting Yard algorithm over the token stream produced by
/// the tokenizer.
pub mod core;

/// The operator table.
///
/// Precedence and associativity of every operator, as read-only lookups.
pub mod operator;
