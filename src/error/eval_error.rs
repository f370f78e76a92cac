#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while resolving and evaluating an
/// expression.
pub enum EvalError {
    /// Tried to resolve a variable that has no bound value.
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },
    /// Attempted division by zero, or by a complex divisor of zero magnitude.
    DivisionByZero,
    /// The operation's result is undefined under the declared numeric policy.
    Domain {
        /// Details describing which policy rule was violated.
        details: String,
    },
    /// Arithmetic overflowed the representable range.
    Overflow,
    /// An integer was too large to be promoted to a real number exactly.
    ValueTooLarge,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundVariable { name } => {
                write!(f, "Variable '{name}' has no bound value.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::Domain { details } => write!(f, "Result is undefined: {details}."),
            Self::Overflow => write!(f,
                                     "Arithmetic overflow while trying to compute result."),
            Self::ValueTooLarge => {
                write!(f, "Integer is too large to represent exactly as a real number.")
            },
        }
    }
}

impl std::error::Error for EvalError {}

/// Result type used throughout resolution and evaluation.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;
