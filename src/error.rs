/// Construction errors.
///
/// Defines all error types that can occur while building an expression tree
/// or while validating a shape request. Construction errors are raised
/// eagerly, before any evaluation takes place, so that a malformed tree can
/// never reach the evaluator.
pub mod build_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while resolving operands and
/// applying operators. Evaluation errors include things like division by
/// zero, unbound variables, results outside the declared numeric domain, or
/// failed numeric conversions.
pub mod eval_error;

pub use build_error::BuildError;
pub use eval_error::EvalError;
