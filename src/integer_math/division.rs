// src/integer_math/division.rs

use crate::error::{MathError, MathResult};

/// Rounding behavior for [`divide`]. Mirrors the usual decimal rounding
/// vocabulary restricted to integer quotients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round toward zero.
    Truncate,
    /// Round toward negative infinity.
    Floor,
    /// Round toward positive infinity.
    Ceiling,
    /// Round to nearest; ties away from zero.
    HalfUp,
    /// Round to nearest; ties toward zero.
    HalfDown,
    /// Round to nearest; ties to the even quotient (banker's rounding).
    HalfEven,
    /// Require an exact quotient; nonzero remainder is an error.
    Exact,
}

/// Integer division of `a` by `b` under an explicit rounding mode.
///
/// Implemented as truncating division plus a remainder-based correction, so
/// the behavior is the mathematical contract for each mode rather than any
/// shift idiom.
///
/// # Returns
/// The rounded quotient, `MathError::InvalidArgument` on division by zero or
/// an overflowing `i64::MIN / -1` quotient, and `MathError::NonExactDivision`
/// for `Exact` mode with a nonzero remainder.
pub fn divide(a: i64, b: i64, mode: RoundingMode) -> MathResult<i64> {
    if b == 0 {
        return Err(MathError::InvalidArgument("division by zero".into()));
    }
    if a == i64::MIN && b == -1 {
        return Err(MathError::InvalidArgument(
            "quotient overflows 64-bit signed range".into(),
        ));
    }
    let q = a / b;
    let r = a % b;
    if r == 0 {
        return Ok(q);
    }
    let negative_quotient = (a < 0) != (b < 0);
    match mode {
        RoundingMode::Truncate => Ok(q),
        RoundingMode::Exact => Err(MathError::NonExactDivision {
            dividend: a,
            divisor: b,
        }),
        RoundingMode::Floor => Ok(if negative_quotient { q - 1 } else { q }),
        RoundingMode::Ceiling => Ok(if negative_quotient { q } else { q + 1 }),
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            // Compare |r| against |b| / 2 without losing the half: 2|r| vs |b|.
            let twice_rem = 2 * r.unsigned_abs();
            let divisor_abs = b.unsigned_abs();
            let round_away = match mode {
                RoundingMode::HalfUp => twice_rem >= divisor_abs,
                RoundingMode::HalfDown => twice_rem > divisor_abs,
                RoundingMode::HalfEven => {
                    twice_rem > divisor_abs || (twice_rem == divisor_abs && q % 2 != 0)
                }
                _ => unreachable!(),
            };
            if round_away {
                Ok(if negative_quotient { q - 1 } else { q + 1 })
            } else {
                Ok(q)
            }
        }
    }
}
