#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a postfix sequence.
pub enum RuntimeError {
    /// An operator or function did not have enough values to work on.
    InsufficientOperands {
        /// The operator or function that was applied.
        operator: String,
        /// Where the operator appears in the expression.
        position: usize,
    },
    /// Attempted division by exactly zero.
    DivisionByZero {
        /// Where the `/` appears in the expression.
        position: usize,
    },
    /// Called a function that is not built in.
    UnsupportedFunction {
        /// The name of the function.
        name: String,
    },
    /// Evaluation left a number of values other than one on the stack.
    MalformedExpression {
        /// How many values were left.
        values: usize,
    },
    /// The argument of a function call failed to evaluate.
    FunctionArgument {
        /// The name of the function.
        name:     String,
        /// The argument as written between the parentheses.
        argument: String,
        /// The error raised by the argument.
        source:   Box<Self>,
    },
}

impl RuntimeError {
    /// Follows `FunctionArgument` wrappers down to the error that started
    /// the failure.
    ///
    /// ## Example
    /// ```
    /// use shuntcalc::error::RuntimeError;
    ///
    /// let inner = RuntimeError::DivisionByZero { position: 6 };
    /// let wrapped = RuntimeError::FunctionArgument { name:     "sqrt".to_string(),
    ///                                                argument: "1/0".to_string(),
    ///                                                source:   Box::new(inner.clone()), };
    ///
    /// assert_eq!(wrapped.root_cause(), &inner);
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::FunctionArgument { source, .. } => source.root_cause(),
            _ => self,
        }
    }

    /// Wraps `self` as the failure of `name`'s argument.
    #[must_use]
    pub fn in_argument(self, name: &str, argument: &str) -> Self {
        Self::FunctionArgument { name:     name.to_string(),
                                 argument: argument.to_string(),
                                 source:   Box::new(self), }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientOperands { operator, position } => {
                write!(f, "Insufficient values for '{operator}' at position {position}.")
            },
            Self::DivisionByZero { position } => {
                write!(f, "Cannot divide by zero at position {position}.")
            },
            Self::UnsupportedFunction { name } => write!(f, "Unsupported function '{name}'."),
            Self::MalformedExpression { values } => {
                write!(f,
                       "Malformed expression: evaluation left {values} values instead of one.")
            },
            Self::FunctionArgument { name,
                                     argument,
                                     source, } => {
                write!(f, "Invalid argument in {name}({argument}): {source}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FunctionArgument { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
