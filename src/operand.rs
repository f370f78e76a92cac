use std::{
    cell::OnceCell,
    ops::{Range, RangeInclusive},
};

use rand::Rng;

use crate::{
    error::{eval_error::EvalResult, BuildError, EvalError},
    value::core::{is_close, Value, ABS_TOLERANCE, REL_TOLERANCE},
};

/// The range a random constant samples from, together with its numeric kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RandomRange {
    /// Sample an integer uniformly from an inclusive range.
    Integer(RangeInclusive<i64>),
    /// Sample a real uniformly from a half-open range.
    Real(Range<f64>),
}

impl RandomRange {
    fn sample(&self) -> Value {
        let mut rng = rand::rng();
        match self {
            Self::Integer(range) => Value::Integer(rng.random_range(range.clone())),
            Self::Real(range) => Value::Real(rng.random_range(range.clone())),
        }
    }
}

/// Represents a leaf value of an expression tree.
///
/// An operand is either a fixed constant, a random constant that is sampled
/// once and memoized for the lifetime of its expression instance, or a named
/// variable with an optional bound value.
///
/// Operand equality is value equality: use [`Operand::value_eq`], which
/// resolves both sides and compares within the default tolerances.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A fixed numeric constant.
    Constant(Value),
    /// A constant whose value is sampled on first resolution and fixed
    /// thereafter.
    RandomConstant {
        /// The range and kind to sample from.
        range: RandomRange,
        /// The memoized sample; absent until first resolution. The cell is
        /// `!Sync`, which confines an expression to one quiz instance at a
        /// time.
        cell:  OnceCell<Value>,
    },
    /// A named variable.
    Variable {
        /// The variable's name, used verbatim when rendering.
        name:    String,
        /// The bound value, if any.
        binding: Option<Value>,
    },
}

impl Operand {
    /// Creates a fixed constant operand.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{operand::Operand, value::core::Value};
    ///
    /// let c = Operand::constant(5);
    /// assert_eq!(c.value().unwrap(), Value::Integer(5));
    /// ```
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }
    /// Creates a random integer constant sampled from `range`.
    ///
    /// The sample is drawn uniformly on first resolution and memoized; all
    /// later resolutions of the same operand instance return the same value.
    ///
    /// # Errors
    /// Returns `BuildError::InvalidRequest` when `range` is empty; an
    /// unsampleable operand can never exist.
    ///
    /// # Example
    /// ```
    /// use mathexpr::operand::Operand;
    ///
    /// let r = Operand::random_integer(1..=10).unwrap();
    /// let first = r.value().unwrap();
    /// assert_eq!(r.value().unwrap(), first);
    ///
    /// assert!(Operand::random_integer(10..=1).is_err());
    /// ```
    pub fn random_integer(range: RangeInclusive<i64>) -> Result<Self, BuildError> {
        if range.is_empty() {
            return Err(BuildError::InvalidRequest { details: format!("empty sampling range {}..={}",
                                                                     range.start(),
                                                                     range.end()), });
        }
        Ok(Self::RandomConstant { range: RandomRange::Integer(range),
                                  cell:  OnceCell::new(), })
    }
    /// Creates a random real constant sampled from `range`.
    ///
    /// # Errors
    /// Returns `BuildError::InvalidRequest` when `range` is empty.
    pub fn random_real(range: Range<f64>) -> Result<Self, BuildError> {
        if range.is_empty() {
            return Err(BuildError::InvalidRequest { details: format!("empty sampling range {}..{}",
                                                                     range.start, range.end), });
        }
        Ok(Self::RandomConstant { range: RandomRange::Real(range),
                                  cell:  OnceCell::new(), })
    }
    /// Creates an unbound variable operand.
    ///
    /// Resolving it fails until a value is bound.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name:    name.into(),
                         binding: None, }
    }
    /// Creates a variable operand with a bound value.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{operand::Operand, value::core::Value};
    ///
    /// let x = Operand::bound_variable("x", 5);
    /// assert_eq!(x.value().unwrap(), Value::Integer(5));
    /// assert_eq!(x.text(), "x");
    /// ```
    pub fn bound_variable(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Variable { name:    name.into(),
                         binding: Some(value.into()), }
    }

    /// Resolves the operand to its numeric value.
    ///
    /// For a random constant, the first call samples uniformly from the
    /// configured range and caches the result; every later call on the same
    /// instance returns the cached value. Rendering shares the same cache, so
    /// no instance is ever sampled twice.
    ///
    /// # Errors
    /// Returns `EvalError::UnboundVariable` when called on a variable with no
    /// bound value.
    ///
    /// # Panics
    /// Panics if a `RandomConstant` variant was assembled by hand with an
    /// empty range; the constructors reject such ranges.
    ///
    /// # Example
    /// ```
    /// use mathexpr::{operand::Operand, value::core::Value};
    ///
    /// assert_eq!(Operand::constant(2.5).value().unwrap(), Value::Real(2.5));
    /// assert!(Operand::variable("x").value().is_err());
    /// ```
    pub fn value(&self) -> EvalResult<Value> {
        match self {
            Self::Constant(value) => Ok(*value),
            Self::RandomConstant { range, cell } => Ok(*cell.get_or_init(|| range.sample())),
            Self::Variable { name, binding } => {
                (*binding).ok_or_else(|| EvalError::UnboundVariable { name: name.clone() })
            },
        }
    }
    /// Renders the operand's textual form.
    ///
    /// Integers render without a decimal point and non-integral reals in
    /// fixed notation. A variable renders its name regardless of binding.
    /// Rendering a random constant resolves it through the same cache as
    /// [`Operand::value`].
    ///
    /// # Example
    /// ```
    /// use mathexpr::operand::Operand;
    ///
    /// assert_eq!(Operand::constant(4.0).text(), "4");
    /// assert_eq!(Operand::constant(2.5).text(), "2.5");
    /// assert_eq!(Operand::bound_variable("x", 5).text(), "x");
    /// ```
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Constant(value) => value.to_string(),
            Self::RandomConstant { range, cell } => cell.get_or_init(|| range.sample()).to_string(),
            Self::Variable { name, .. } => name.clone(),
        }
    }
    /// Compares two operands by resolved value, within the default
    /// tolerances.
    ///
    /// # Errors
    /// Propagates any resolution error from either side.
    ///
    /// # Example
    /// ```
    /// use mathexpr::operand::Operand;
    ///
    /// let a = Operand::constant(5);
    /// let b = Operand::bound_variable("x", 5.0);
    /// assert!(a.value_eq(&b).unwrap());
    /// ```
    pub fn value_eq(&self, other: &Self) -> EvalResult<bool> {
        is_close(&self.value()?, &other.value()?, ABS_TOLERANCE, REL_TOLERANCE)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}
