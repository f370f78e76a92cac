use serde::{Deserialize, Serialize};

use crate::{
    error::{eval_error::EvalResult, EvalError},
    util::num::{i64_to_f64_checked, i64_to_u32_checked},
    value::core::{Value, ZERO_TOLERANCE},
};

/// Whether children of equal precedence group to the left or to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` means `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` means `a ^ (b ^ c)`.
    Right,
}

/// How an operator assembles its rendered children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderForm {
    /// The symbol sits between the two children.
    Infix,
    /// The symbol prefixes a single child.
    Prefix,
}

/// The closed set of supported operators.
///
/// Each operator carries its arity, associativity and render form as data;
/// the precedence rank lives in the [`Bodmas`] policy so that the operator
/// table and the formatter share a single source of truth.
///
/// [`Bodmas`]: crate::bodmas::Bodmas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Binary `+`.
    Add,
    /// Binary `-`.
    Subtract,
    /// Binary `*`.
    Multiply,
    /// Binary `/`.
    Divide,
    /// Binary `^`.
    Power,
    /// Unary prefix `-`.
    Negate,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Operator {
    /// Returns the operator's rendered symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract | Self::Negate => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
        }
    }
    /// Returns the number of children the operator takes.
    ///
    /// # Example
    /// ```
    /// use mathexpr::operator::Operator;
    ///
    /// assert_eq!(Operator::Add.arity(), 2);
    /// assert_eq!(Operator::Negate.arity(), 1);
    /// ```
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Negate => 1,
            _ => 2,
        }
    }
    /// Returns the operator's associativity.
    #[must_use]
    pub const fn associativity(self) -> Associativity {
        match self {
            Self::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }
    /// Returns how the operator assembles its rendered children.
    #[must_use]
    pub const fn render_form(self) -> RenderForm {
        match self {
            Self::Negate => RenderForm::Prefix,
            _ => RenderForm::Infix,
        }
    }
    /// Applies the operator to already-resolved child values.
    ///
    /// Mixed types are promoted pairwise; a complex operand makes the result
    /// complex, and the result is never demoted back to a real. Division by
    /// zero is checked explicitly for all numeric categories, and integer
    /// arithmetic is checked for overflow.
    ///
    /// # Errors
    /// - `EvalError::DivisionByZero`: Zero (or zero-magnitude) divisor.
    /// - `EvalError::Domain`: A result the numeric policy declares undefined.
    /// - `EvalError::Overflow`: Integer or complex arithmetic overflowed.
    ///
    /// # Panics
    /// Panics when the slice length does not match the operator's arity.
    /// Expression construction checks arity eagerly, so evaluation of a
    /// built tree can never trip this.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{operator::Operator, value::core::Value};
    ///
    /// let product = Operator::Multiply.apply(&[Value::Real(1.5), Value::Real(2.0)]);
    /// assert_eq!(product.unwrap(), Value::Real(3.0));
    ///
    /// let quotient = Operator::Divide.apply(&[Value::Integer(5), Value::Integer(0)]);
    /// assert!(quotient.is_err());
    /// ```
    pub fn apply(self, operands: &[Value]) -> EvalResult<Value> {
        match (self, operands) {
            (Self::Negate, [value]) => eval_negate(value),
            (Self::Power, [base, exponent]) => eval_pow(base, exponent),
            (op, [left, right]) => eval_scalar(op, left, right),
            _ => unreachable!("child count is checked at construction"),
        }
    }
}

/// Evaluates `Add`, `Subtract`, `Multiply` and `Divide` over promoted
/// operands.
fn eval_scalar(op: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
    use Operator::{Add, Divide, Multiply, Subtract};
    use Value::{Complex, Integer, Real};

    match (left, right) {
        (Complex(_), _) | (_, Complex(_)) => {
            let (left, right) = (*left).promote_to_complex(right)?;
            let left = left.as_complex()?;
            let right = right.as_complex()?;

            Ok(Complex(match op {
                           Add => left + right,
                           Subtract => left - right,
                           Multiply => left * right,
                           Divide => left.checked_div(right)?,
                           _ => unreachable!(),
                       }))
        },
        (Real(_), _) | (_, Real(_)) => {
            let (left, right) = (*left).promote_to_real(right)?;
            let left = left.as_real()?;
            let right = right.as_real()?;

            Ok(Real(match op {
                        Add => left + right,
                        Subtract => left - right,
                        Multiply => left * right,
                        Divide => {
                            if right.abs() <= ZERO_TOLERANCE {
                                return Err(EvalError::DivisionByZero);
                            }
                            left / right
                        },
                        _ => unreachable!(),
                    }))
        },
        (Integer(a), Integer(b)) => match op {
            Add => a.checked_add(*b).map(Integer).ok_or(EvalError::Overflow),
            Subtract => a.checked_sub(*b).map(Integer).ok_or(EvalError::Overflow),
            Multiply => a.checked_mul(*b).map(Integer).ok_or(EvalError::Overflow),
            Divide => {
                if *b == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                match a.checked_rem(*b) {
                    // i64::MIN / -1 does not fit back into an i64.
                    None => Err(EvalError::Overflow),
                    Some(0) => a.checked_div(*b).map(Integer).ok_or(EvalError::Overflow),
                    // Inexact integer division answers a maths question, not
                    // a machine one.
                    Some(_) => Ok(Real(i64_to_f64_checked(*a)? / i64_to_f64_checked(*b)?)),
                }
            },
            _ => unreachable!(),
        },
    }
}

/// Evaluates `base ^ exponent`.
///
/// Integer-integer exponentiation uses checked arithmetic. Negative integer
/// exponents are computed in floating-point form. Complex bases support both
/// integer and real exponents; complex exponents are outside the declared
/// domain.
fn eval_pow(base: &Value, exponent: &Value) -> EvalResult<Value> {
    use Value::{Complex, Integer, Real};

    match (base, exponent) {
        (Integer(b), Integer(e)) => {
            if *b == 0 && *e <= 0 {
                return Err(zero_power_domain());
            }

            if *e < 0 {
                Ok(Real(real_pow(base.as_real()?, exponent.as_real()?)?))
            } else {
                b.checked_pow(i64_to_u32_checked(*e)?)
                 .map(Integer)
                 .ok_or(EvalError::Overflow)
            }
        },
        (Complex(b), Integer(e)) => Ok(Complex(b.checked_powi(*e)?)),
        (Complex(b), Real(e)) => {
            if b.abs() <= ZERO_TOLERANCE && *e <= 0.0 {
                return Err(zero_power_domain());
            }
            Ok(Complex(b.powf(*e)))
        },
        (_, Complex(_)) => {
            Err(EvalError::Domain { details: "complex exponents are not supported".to_string(), })
        },
        _ => Ok(Real(real_pow(base.as_real()?, exponent.as_real()?)?)),
    }
}

/// Evaluates a real power under the declared domain policy.
fn real_pow(base: f64, exponent: f64) -> EvalResult<f64> {
    if base == 0.0 && exponent <= 0.0 {
        return Err(zero_power_domain());
    }

    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::Domain { details: "negative real raised to a non-integer power".to_string(), });
    }

    let result = base.powf(exponent);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::Overflow)
    }
}

fn zero_power_domain() -> EvalError {
    EvalError::Domain { details: "zero raised to a non-positive power".to_string(), }
}

/// Evaluates unary negation.
fn eval_negate(value: &Value) -> EvalResult<Value> {
    match value {
        Value::Integer(n) => n.checked_neg().map(Value::Integer).ok_or(EvalError::Overflow),
        Value::Real(r) => Ok(Value::Real(-r)),
        Value::Complex(c) => Ok(Value::Complex(-*c)),
    }
}
