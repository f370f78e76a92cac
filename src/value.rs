/// Complex number support.
///
/// Defines the `ComplexNumber` type used for arithmetic with real and
/// imaginary parts. Includes implementations for basic arithmetic operations,
/// magnitude, integer and real powers, and the four display forms (`0`, `a`,
/// `bj`, `a+bj`) with a configurable imaginary-unit symbol.
///
/// Complex numbers are fully supported in expressions and can participate in
/// mixed-type maths.
pub mod complex;

pub mod core;
