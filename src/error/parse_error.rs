#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing an expression or
/// reordering it into postfix form.
///
/// Positions are byte offsets into the expression after whitespace has been
/// removed.
pub enum ParseError {
    /// Found a character that starts no valid token.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        position:  usize,
    },
    /// A function call's opening parenthesis is never closed.
    UnmatchedFunctionParens {
        /// The name of the function.
        name:     String,
        /// Where the function name starts.
        position: usize,
    },
    /// A lexeme looked like a token but could not be interpreted as one,
    /// such as the number `1.2.3`.
    InvalidToken {
        /// The text of the token.
        token:    String,
        /// Where the token starts.
        position: usize,
    },
    /// A `(` without its `)`, or a `)` without its `(`.
    MismatchedParentheses {
        /// Where the unmatched parenthesis was found.
        position: usize,
    },
    /// The argument of a function call could not be tokenized.
    FunctionArgument {
        /// The name of the function.
        name:     String,
        /// The argument as written between the parentheses.
        argument: String,
        /// The error raised inside the argument.
        source:   Box<Self>,
    },
}

impl ParseError {
    /// Returns the position the error refers to. For an error inside a
    /// function argument this is the position of the innermost failure.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::UnmatchedFunctionParens { position, .. }
            | Self::InvalidToken { position, .. }
            | Self::MismatchedParentheses { position } => *position,
            Self::FunctionArgument { source, .. } => source.position(),
        }
    }

    /// Wraps `self` as the failure of `name`'s argument.
    #[must_use]
    pub fn in_argument(self, name: &str, argument: &str) -> Self {
        Self::FunctionArgument { name:     name.to_string(),
                                 argument: argument.to_string(),
                                 source:   Box::new(self), }
    }

    /// Follows `FunctionArgument` wrappers down to the error that started
    /// the failure.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::FunctionArgument { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character, position } => {
                write!(f, "Invalid character '{character}' at position {position}.")
            },
            Self::UnmatchedFunctionParens { name, position } => {
                write!(f,
                       "Unmatched parentheses in call to '{name}' at position {position}.")
            },
            Self::InvalidToken { token, position } => {
                write!(f, "Invalid token '{token}' at position {position}.")
            },
            Self::MismatchedParentheses { position } => {
                write!(f, "Mismatched parentheses at position {position}.")
            },
            Self::FunctionArgument { name,
                                     argument,
                                     source, } => {
                write!(f, "Invalid argument in {name}({argument}): {source}")
            },
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FunctionArgument { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
