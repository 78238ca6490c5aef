/// Core evaluation logic for expression trees.
///
/// Walks a tree depth first, applying unary and binary operators and
/// dispatching function calls.
pub mod core;

/// Built-in function dispatch.
///
/// Maps function names to their numeric implementations.
pub mod function;

/// Postfix evaluation.
///
/// Consumes a postfix sequence with a value stack, folding it into a tree
/// that is then evaluated.
pub mod postfix;
