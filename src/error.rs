/// Parsing errors.
///
/// Defines the errors raised while tokenizing an expression and converting it
/// to postfix form: invalid characters, malformed numbers and unbalanced
/// parentheses.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while evaluating a postfix sequence, such as
/// division by zero, missing operands or unknown functions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Any failure of the evaluation pipeline.
pub enum Error {
    /// The expression could not be tokenized or reordered.
    Parse(ParseError),
    /// The expression could not be evaluated.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<RuntimeError> for Error {
    fn from(value: RuntimeError) -> Self {
        Self::Runtime(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
