/// Precedence-correct rendering.
///
/// Walks an expression tree bottom-up, wrapping each child in brackets
/// whenever the BODMAS policy says the parent's precedence or associativity
/// requires it, and assembles the pieces using each operator's render form.
///
/// # Responsibilities
/// - Produces text embeddable directly into a question or answer payload.
/// - Consults [`Bodmas`](crate::bodmas::Bodmas) for every bracket decision.
/// - Resolves random constants through the same cache as evaluation.
pub mod format;
/// Fully-resolved persistence form.
///
/// Defines `FrozenExpression`, a plain serializable value tree holding
/// resolved operand values (sampled randoms included) and variable names.
/// The persistence collaborator stores this form between requests and thaws
/// it back; a thawed expression evaluates and renders identically without
/// resampling anything.
pub mod frozen;

pub mod core;
