use serde::{Deserialize, Serialize};

use crate::{
    error::{eval_error::EvalResult, EvalError},
    util::num::i64_to_f64_checked,
    value::complex::ComplexNumber,
};

/// Default relative tolerance used for approximate comparisons.
pub const REL_TOLERANCE: f64 = 1e-10;
/// Default absolute tolerance used for approximate comparisons.
pub const ABS_TOLERANCE: f64 = 0.0;
/// Magnitude below which a divisor is treated as zero.
pub const ZERO_TOLERANCE: f64 = 1e-12;

/// Represents a resolved numeric value.
///
/// This enum models the three numeric types an operand can resolve to and an
/// operator can produce. Mixed-type arithmetic promotes pairwise: an integer
/// meeting a real becomes real, and anything meeting a complex number becomes
/// complex. A complex result is never demoted to a real one, even when its
/// imaginary part works out to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A real value (double precision floating-point).
    Real(f64),
    /// A complex number (with real and imaginary parts).
    Complex(ComplexNumber),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if it is complex.
    ///
    /// For integers, conversion fails if the value is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Errors
    /// - `EvalError::ValueTooLarge`: If an integer is not representable.
    /// - `EvalError::Domain`: If the value is complex.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real().unwrap(), 10.0);
    /// assert_eq!(Value::Real(2.5).as_real().unwrap(), 2.5);
    /// ```
    pub fn as_real(&self) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n),
            Self::Complex(_) => {
                Err(EvalError::Domain { details: "a complex value has no real form".to_string(), })
            },
        }
    }
    /// Converts the value to a `ComplexNumber`.
    ///
    /// # Errors
    /// Returns `EvalError::ValueTooLarge` if an integer is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::{complex::ComplexNumber, core::Value};
    ///
    /// let c = Value::Integer(3).as_complex().unwrap();
    /// assert_eq!(c, ComplexNumber::new(3.0, 0.0));
    /// ```
    pub fn as_complex(&self) -> EvalResult<ComplexNumber> {
        match self {
            Self::Complex(c) => Ok(*c),
            Self::Real(r) => Ok(ComplexNumber::from(*r)),
            Self::Integer(n) => Ok(ComplexNumber::from(i64_to_f64_checked(*n)?)),
        }
    }
    /// Promotes an integer to a real value for mixed maths, or returns the
    /// pair as-is if already matching.
    ///
    /// # Errors
    /// Returns `EvalError::ValueTooLarge` if an integer cannot be promoted
    /// exactly.
    pub fn promote_to_real(self, other: &Self) -> EvalResult<(Self, Self)> {
        use Value::{Integer, Real};

        match (&self, other) {
            (Real(_), Integer(_)) => Ok((self, Real(other.as_real()?))),
            (Integer(_), Real(_)) => Ok((Real(self.as_real()?), *other)),
            _ => Ok((self, *other)),
        }
    }
    /// Promotes any number to complex for mixed maths, or returns the pair
    /// as-is if already matching.
    ///
    /// # Errors
    /// Returns `EvalError::ValueTooLarge` if an integer cannot be promoted
    /// exactly.
    pub fn promote_to_complex(self, other: &Self) -> EvalResult<(Self, Self)> {
        use Value::Complex;

        match (&self, other) {
            (Complex(_), _) => Ok((self, Complex(other.as_complex()?))),
            (_, Complex(_)) => Ok((Complex(self.as_complex()?), *other)),
            _ => Ok((self, *other)),
        }
    }
    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Complex`].
    ///
    /// [`Complex`]: Value::Complex
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", render_real(*r)),
            Self::Complex(c) => write!(f, "{c}"),
        }
    }
}

/// Renders a real number the way quiz text expects it.
///
/// Integral values render without a decimal point, everything else renders
/// in fixed (never scientific) notation.
///
/// # Example
/// ```
/// use mathexpr::value::core::render_real;
///
/// assert_eq!(render_real(4.0), "4");
/// assert_eq!(render_real(-3.0), "-3");
/// assert_eq!(render_real(2.5), "2.5");
/// assert_eq!(render_real(0.0), "0");
/// ```
#[must_use]
pub fn render_real(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Checks whether two values are approximately equal within the given
/// absolute and relative tolerances.
///
/// The comparison computes the difference between the values and compares it
/// to the larger of `abs_tol` and `rel_tol * max_norm`, where `max_norm` is
/// the maximum magnitude of the two operands. Integers compare exactly;
/// anything involving a complex number compares by complex magnitude.
///
/// # Errors
/// Returns `EvalError::ValueTooLarge` if an integer operand cannot be
/// promoted exactly.
///
/// # Example
/// ```
/// use mathexpr::value::core::{is_close, Value};
///
/// let a = Value::Real(1.0000000001);
/// let b = Value::Real(1.0);
///
/// assert!(is_close(&a, &b, 1e-11, 1e-9).unwrap());
/// assert!(!is_close(&a, &b, 0.0, 1e-12).unwrap());
/// ```
pub fn is_close(left: &Value, right: &Value, abs_tol: f64, rel_tol: f64) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),

        (Value::Complex(_), _) | (_, Value::Complex(_)) => {
            let a = left.as_complex()?;
            let b = right.as_complex()?;

            let difference = (a - b).abs();
            let max_norm = a.abs().max(b.abs());

            Ok(difference <= abs_tol.max(rel_tol * max_norm))
        },

        _ => {
            let a = left.as_real()?;
            let b = right.as_real()?;

            let difference = (a - b).abs();
            let max_norm = a.abs().max(b.abs());

            Ok(difference <= abs_tol.max(rel_tol * max_norm))
        },
    }
}
