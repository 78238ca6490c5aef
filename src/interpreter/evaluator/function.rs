use std::str::FromStr;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// The built-in functions. Each takes a single numeric argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Builtin {
    /// Sine, argument in radians.
    Sin,
    /// Cosine, argument in radians.
    Cos,
    /// Tangent, argument in radians.
    Tan,
    /// Square root. Negative arguments give NaN.
    Sqrt,
}

impl Builtin {
    /// Every built-in function.
    pub const ALL: [Self; 4] = [Self::Sin, Self::Cos, Self::Tan, Self::Sqrt];

    /// The name the function is called by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
        }
    }

    /// Whether `name` is the name of a built-in function.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        Self::ALL.iter().any(|builtin| builtin.name() == name)
    }

    /// Applies the function to an already evaluated argument.
    #[must_use]
    pub fn apply(self, argument: f64) -> f64 {
        match self {
            Self::Sin => argument.sin(),
            Self::Cos => argument.cos(),
            Self::Tan => argument.tan(),
            Self::Sqrt => argument.sqrt(),
        }
    }
}

impl FromStr for Builtin {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
                 .find(|builtin| builtin.name() == s)
                 .ok_or_else(|| RuntimeError::UnsupportedFunction { name: s.to_string() })
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calls the built-in function `name` with a resolved argument.
///
/// # Errors
/// `UnsupportedFunction` if `name` is not a built-in function.
///
/// # Example
/// ```
/// use shuntcalc::{error::RuntimeError, interpreter::evaluator::function::call_function};
///
/// assert_eq!(call_function("sqrt", 9.0), Ok(3.0));
/// assert!(call_function("sqrt", -1.0).unwrap().is_nan());
/// assert_eq!(call_function("log", 1.0),
///            Err(RuntimeError::UnsupportedFunction { name: "log".to_string() }));
/// ```
pub fn call_function(name: &str, argument: f64) -> EvalResult<f64> {
    let builtin = name.parse::<Builtin>()?;
    Ok(builtin.apply(argument))
}
