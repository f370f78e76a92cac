use crate::operator::Operator;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while constructing an expression.
pub enum BuildError {
    /// An operator node was given the wrong number of children.
    MalformedExpression {
        /// The operator that was being attached.
        operator: Operator,
        /// The child count the operator's arity requires.
        expected: usize,
        /// The child count that was actually supplied.
        found:    usize,
    },
    /// A construction request could not produce an expression, such as a
    /// shape request with no operators or a random constant over an empty
    /// sampling range.
    InvalidRequest {
        /// Details describing why the request is invalid.
        details: String,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedExpression { operator,
                                        expected,
                                        found, } => write!(f,
                                                           "Malformed expression: operator '{operator}' takes {expected} operand(s), but {found} were supplied."),
            Self::InvalidRequest { details } => {
                write!(f, "Invalid construction request: {details}.")
            },
        }
    }
}

impl std::error::Error for BuildError {}
