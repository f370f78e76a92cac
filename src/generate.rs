use std::ops::RangeInclusive;

use rand::Rng;

use crate::{
    error::BuildError,
    expression::core::Expression,
    operand::Operand,
    operator::Operator,
    value::{complex::ComplexNumber, core::Value},
};

/// Describes the desired shape of a generated expression.
///
/// This is the construction request the quiz-flow collaborator sends:
/// which operators may appear, how deeply they nest, what the random
/// constants sample from, and which variables are in play.
#[derive(Debug, Clone)]
pub struct ShapeRequest {
    /// Operators the generator may pick from.
    pub operators:           Vec<Operator>,
    /// Operator nesting depth; `0` yields a single leaf.
    pub depth:               usize,
    /// The inclusive range random integer constants sample from.
    pub constant_range:      RangeInclusive<i64>,
    /// Variables available as leaves, with their bound values.
    pub variables:           Vec<(String, Value)>,
    /// Probability that a leaf is a complex constant instead of a real one.
    pub complex_probability: f64,
}

impl Default for ShapeRequest {
    fn default() -> Self {
        Self { operators:           vec![Operator::Add, Operator::Subtract, Operator::Multiply],
               depth:               2,
               constant_range:      1..=10,
               variables:           Vec::new(),
               complex_probability: 0.0, }
    }
}

impl ShapeRequest {
    fn validate(&self) -> Result<(), BuildError> {
        if self.depth > 0 && self.operators.is_empty() {
            return Err(BuildError::InvalidRequest { details: "no operators to pick from".to_string(), });
        }
        if self.constant_range.is_empty() {
            return Err(BuildError::InvalidRequest { details: format!("empty constant range {}..={}",
                                                                     self.constant_range.start(),
                                                                     self.constant_range.end()), });
        }
        if !(0.0..=1.0).contains(&self.complex_probability) {
            return Err(BuildError::InvalidRequest { details: format!("complex probability {} is not within 0..=1",
                                                                     self.complex_probability), });
        }
        Ok(())
    }
}

/// Generates an expression tree matching the requested shape.
///
/// Operators and leaf kinds are picked with the supplied generator, so a
/// seeded generator reproduces the same tree shape. Random-constant leaves
/// stay unsampled: their values are drawn lazily, once, on the expression's
/// first resolution.
///
/// # Errors
/// Returns `BuildError::InvalidRequest` when the request cannot produce an
/// expression (no operators at nonzero depth, an empty constant range, or a
/// probability outside `0..=1`).
///
/// # Example
/// ```
/// use mathexpr::generate::{generate, ShapeRequest};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let expr = generate(&mut rng, &ShapeRequest::default()).unwrap();
///
/// // Add/Subtract/Multiply over small integers always evaluates.
/// assert!(expr.evaluate().is_ok());
/// ```
pub fn generate<R: Rng>(rng: &mut R, request: &ShapeRequest) -> Result<Expression, BuildError> {
    request.validate()?;
    Ok(subtree(rng, request, request.depth))
}

fn subtree<R: Rng>(rng: &mut R, request: &ShapeRequest, depth: usize) -> Expression {
    if depth == 0 {
        return Expression::Leaf(leaf(rng, request));
    }

    let op = request.operators[rng.random_range(0..request.operators.len())];
    let children = (0..op.arity()).map(|_| subtree(rng, request, depth - 1))
                                  .collect();

    // Child count comes straight from the arity, so this cannot fail.
    Expression::node(op, children).unwrap_or_else(|_| unreachable!())
}

fn leaf<R: Rng>(rng: &mut R, request: &ShapeRequest) -> Operand {
    if request.complex_probability > 0.0 && rng.random_bool(request.complex_probability) {
        return complex_leaf(rng, request);
    }

    // One slot for a fresh random constant, one per available variable.
    let pick = rng.random_range(0..=request.variables.len());
    if pick == 0 {
        // The range was validated with the request, so this cannot fail.
        Operand::random_integer(request.constant_range.clone()).unwrap_or_else(|_| unreachable!())
    } else {
        let (name, value) = &request.variables[pick - 1];
        Operand::bound_variable(name.clone(), *value)
    }
}

/// Samples a complex constant eagerly; unlike a random real constant there
/// is no memoization to defer to.
#[allow(clippy::cast_precision_loss)]
fn complex_leaf<R: Rng>(rng: &mut R, request: &ShapeRequest) -> Operand {
    let real = rng.random_range(request.constant_range.clone()) as f64;
    let imaginary = rng.random_range(request.constant_range.clone()) as f64;

    Operand::constant(Value::Complex(ComplexNumber::new(real, imaginary)))
}
