use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    error::{eval_error::EvalResult, EvalError},
    value::core::{render_real, ZERO_TOLERANCE},
};

/// `0.0` as a complex number.
pub const ZERO: ComplexNumber = ComplexNumber::new(0.0, 0.0);
/// `1.0` as a complex number.
pub const ONE: ComplexNumber = ComplexNumber::new(1.0, 0.0);

/// The imaginary-unit symbol used by `Display`.
///
/// Electrical-engineering notation, matching what the quizzes print.
pub const IMAGINARY_UNIT: char = 'j';

/// Represents a complex number with real and imaginary parts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComplexNumber {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for ComplexNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_with_unit(IMAGINARY_UNIT))
    }
}

impl ComplexNumber {
    /// Constructs a new complex number from real and imaginary components.
    ///
    /// # Parameters
    /// - `real`: The real part.
    /// - `imaginary`: The imaginary part.
    ///
    /// # Returns
    /// The new `ComplexNumber`.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(5.0, -1.0);
    /// assert_eq!(c.real, 5.0);
    /// assert_eq!(c.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Returns the absolute value (magnitude) of the complex number.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(3.0, 4.0);
    /// assert_eq!(c.abs(), 5.0);
    /// ```
    #[must_use]
    pub fn abs(&self) -> f64 {
        self.real.hypot(self.imaginary)
    }
    /// Returns the argument (phase angle) in radians.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(0.0, 1.0);
    /// assert!((c.arg() - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }
    /// Divides by another complex number, failing when the divisor's
    /// magnitude is zero within tolerance.
    ///
    /// This is the only division the crate exposes; the raw formula would
    /// silently produce infinities or NaN for a zero divisor.
    ///
    /// # Errors
    /// Returns `EvalError::DivisionByZero` when `rhs` has zero magnitude.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    ///
    /// let a = ComplexNumber::new(1.0, 2.0);
    /// let b = ComplexNumber::new(0.0, 1.0);
    /// assert_eq!(a.checked_div(b).unwrap(), ComplexNumber::new(2.0, -1.0));
    ///
    /// assert!(a.checked_div(ComplexNumber::new(0.0, 0.0)).is_err());
    /// ```
    pub fn checked_div(self, rhs: Self) -> EvalResult<Self> {
        if rhs.abs() <= ZERO_TOLERANCE {
            return Err(EvalError::DivisionByZero);
        }

        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Ok(Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary)
                             / denom,
                  imaginary: self.imaginary
                                 .mul_add(rhs.real, -(self.real * rhs.imaginary))
                             / denom, })
    }
    /// Raises the complex number to an integer power.
    ///
    /// Performs repeated multiplication with overflow and zero-base checks.
    ///
    /// # Errors
    /// Returns `EvalError::Domain` for a zero-magnitude base and a
    /// non-positive exponent, and `EvalError::Overflow` when an intermediate
    /// result is no longer finite.
    ///
    /// # Parameters
    /// - `exp`: The exponent (may be negative).
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::{ComplexNumber, ONE};
    /// let c = ComplexNumber::new(2.0, 0.0);
    /// assert_eq!(c.checked_powi(3).unwrap(), ComplexNumber::new(8.0, 0.0));
    /// assert_eq!(ONE.checked_powi(0).unwrap(), ONE);
    /// ```
    pub fn checked_powi(self, exp: i64) -> EvalResult<Self> {
        if self.abs() <= ZERO_TOLERANCE && exp <= 0 {
            return Err(EvalError::Domain { details:
                                               "zero raised to a non-positive power".to_string(), });
        }

        if exp == 0 {
            return Ok(ONE);
        }

        let mut base = self;
        let mut result = ONE;
        // unsigned_abs: `exp.abs()` itself overflows for i64::MIN.
        let mut n = exp.unsigned_abs();

        while n > 0 {
            if n % 2 == 1 {
                result *= base;
                if !result.real.is_finite() || !result.imaginary.is_finite() {
                    return Err(EvalError::Overflow);
                }
            }
            base = base * base;
            if !base.real.is_finite() || !base.imaginary.is_finite() {
                return Err(EvalError::Overflow);
            }
            n /= 2;
        }

        if exp < 0 {
            result = result.recip();
            if !result.real.is_finite() || !result.imaginary.is_finite() {
                return Err(EvalError::Overflow);
            }
        }

        Ok(result)
    }
    /// Raises the complex number to a floating-point power.
    ///
    /// Computed in polar form. Callers must reject a zero-magnitude base
    /// with a non-positive exponent before calling; the operator table does.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    /// let c = ComplexNumber::new(4.0, 0.0);
    /// let res = c.powf(0.5);
    /// assert!((res.real - 2.0).abs() < 1e-10);
    /// assert!(res.imaginary.abs() < 1e-10);
    /// ```
    #[must_use]
    pub fn powf(self, exp: f64) -> Self {
        let r = self.abs();
        let theta = self.arg();

        let new_r = r.powf(exp);
        let new_theta = theta * exp;

        Self { real:      new_r * new_theta.cos(),
               imaginary: new_r * new_theta.sin(), }
    }
    /// Renders the number using the given imaginary-unit symbol.
    ///
    /// Selects among the four textual forms depending on which components
    /// are nonzero: pure real (`a`), pure imaginary (`bj`), full (`a+bj` /
    /// `a-bj`), or zero (`0`). Integral components render without a decimal
    /// point.
    ///
    /// # Parameters
    /// - `unit`: The imaginary-unit symbol, usually `j` or `i`.
    ///
    /// # Example
    /// ```
    /// use mathexpr::value::complex::ComplexNumber;
    ///
    /// assert_eq!(ComplexNumber::new(0.0, 0.0).render_with_unit('j'), "0");
    /// assert_eq!(ComplexNumber::new(3.0, 0.0).render_with_unit('j'), "3");
    /// assert_eq!(ComplexNumber::new(0.0, 2.0).render_with_unit('j'), "2j");
    /// assert_eq!(ComplexNumber::new(3.0, -2.5).render_with_unit('i'), "3-2.5i");
    /// ```
    #[must_use]
    pub fn render_with_unit(&self, unit: char) -> String {
        match (self.real, self.imaginary) {
            (0.0, 0.0) => "0".to_string(),
            (real, 0.0) => render_real(real),
            (0.0, imaginary) => format!("{}{unit}", render_real(imaginary)),
            (real, imaginary) if imaginary > 0.0 => {
                format!("{}+{}{unit}", render_real(real), render_real(imaginary))
            },
            (real, imaginary) => {
                format!("{}-{}{unit}", render_real(real), render_real(-imaginary))
            },
        }
    }

    /// Returns the reciprocal (1/z). Assumes a nonzero argument; the zero
    /// check lives in the callers.
    fn recip(self) -> Self {
        let norm_squared = self.real * self.real + self.imaginary * self.imaginary;

        Self { real:      self.real / norm_squared,
               imaginary: -(self.imaginary / norm_squared), }
    }
}

impl ops::Neg for ComplexNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for ComplexNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::Sub for ComplexNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for ComplexNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::MulAssign for ComplexNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T> From<T> for ComplexNumber where T: Into<f64>
{
    fn from(value: T) -> Self {
        Self { real:      value.into(),
               imaginary: 0.0, }
    }
}

impl PartialEq for ComplexNumber {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for ComplexNumber {}

impl Hash for ComplexNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.real).hash(state);
        OrderedFloat(self.imaginary).hash(state);
    }
}
