use crate::error::{eval_error::EvalResult, EvalError};

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(EvalError::ValueTooLarge)` if the value exceeds
/// `MAX_SAFE_I64_INT` in absolute value.
///
/// ## Parameters
/// - `value`: The integer to convert.
///
/// ## Returns
/// - `Ok(f64)`: The converted value if it is safe.
/// - `Err(EvalError::ValueTooLarge)`: If the value is too large.
///
/// ## Example
/// ```
/// use mathexpr::util::num::{i64_to_f64_checked, MAX_SAFE_I64_INT};
///
/// // Works for safe values
/// assert_eq!(i64_to_f64_checked(42).unwrap(), 42.0);
///
/// // Fails for values outside the safe range
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64_checked(value: i64) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT as u64 {
        return Err(EvalError::ValueTooLarge);
    }
    Ok(value as f64)
}

/// Safely converts an `i64` exponent to the `u32` that `i64::checked_pow`
/// expects.
///
/// ## Errors
/// Returns `Err(EvalError::Overflow)` if the exponent is negative or exceeds
/// `u32::MAX`; an integer power that large cannot fit in an `i64` anyway.
///
/// ## Parameters
/// - `value`: The exponent to convert.
///
/// ## Returns
/// - `Ok(u32)`: The converted exponent if it is safe.
/// - `Err(EvalError::Overflow)`: If the exponent is out of range.
///
/// ## Example
/// ```
/// use mathexpr::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(10).unwrap(), 10);
/// assert!(i64_to_u32_checked(-1).is_err());
/// assert!(i64_to_u32_checked(i64::MAX).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub const fn i64_to_u32_checked(value: i64) -> EvalResult<u32> {
    if value < 0 || value > u32::MAX as i64 {
        return Err(EvalError::Overflow);
    }
    Ok(value as u32)
}
