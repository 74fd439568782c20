// src/integer_math/mul_mod.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::mod_pow::Reducer;

const SAFE_MODULUS_LIMIT: u64 = 1 << 63;

/// Computes `a * b mod m` without overflow in any intermediate, for any
/// modulus `m` in `[1, 2^63)`.
///
/// Uses binary "doubling" multiplication: the product is accumulated by
/// repeatedly doubling `a` (reducing after every doubling) and conditionally
/// adding into an accumulator based on the bits of `b`. Slower than a
/// widening multiply but valid wherever Barrett/Montgomery preconditions
/// fail (even modulus, or modulus at or above 2^31).
///
/// # Arguments
/// * `a`, `b` - The operands; reduced modulo `m` before accumulation
/// * `m` - The modulus, `1 <= m < 2^63`
///
/// # Returns
/// `a * b mod m`, or `MathError::InvalidModulus` when `m` is zero or too large.
pub fn mul_mod(a: u64, b: u64, m: u64) -> MathResult<u64> {
    validate_modulus(m)?;
    Ok(mul_mod_raw(a, b, m))
}

/// `a + b mod m` under the same modulus precondition as [`mul_mod`].
pub fn add_mod(a: u64, b: u64, m: u64) -> MathResult<u64> {
    validate_modulus(m)?;
    Ok(add_mod_raw(a % m, b % m, m))
}

/// `a - b mod m` (canonical residue) under the same precondition as [`mul_mod`].
pub fn sub_mod(a: u64, b: u64, m: u64) -> MathResult<u64> {
    validate_modulus(m)?;
    let (a, b) = (a % m, b % m);
    Ok(if a >= b { a - b } else { a + m - b })
}

fn validate_modulus(m: u64) -> MathResult<()> {
    if m == 0 {
        return Err(MathError::InvalidModulus("modulus must be positive".into()));
    }
    if m >= SAFE_MODULUS_LIMIT {
        return Err(MathError::InvalidModulus(format!(
            "modulus {} exceeds the 63-bit doubling-multiplication bound",
            m
        )));
    }
    Ok(())
}

/// Doubling multiplication with the modulus already validated to `[1, 2^63)`.
/// Every sum stays below `2m < 2^64`.
pub(crate) fn mul_mod_raw(a: u64, b: u64, m: u64) -> u64 {
    debug_assert!(m >= 1 && m < SAFE_MODULUS_LIMIT);
    let mut a = a % m;
    let mut b = b % m;
    let mut acc = 0u64;
    while b > 0 {
        if b & 1 == 1 {
            acc = add_mod_raw(acc, a, m);
        }
        a = add_mod_raw(a, a, m);
        b >>= 1;
    }
    acc
}

/// `a + b mod m` for `a, b` already in `[0, m)`.
pub(crate) fn add_mod_raw(a: u64, b: u64, m: u64) -> u64 {
    let sum = a + b;
    if sum >= m {
        sum - m
    } else {
        sum
    }
}

/// Widening `a * b mod m` through a 128-bit intermediate. Internal helper for
/// the full-range u64 paths (primality witnessing, rho stepping) where the
/// doubling loop would dominate the runtime.
pub(crate) fn mul_mod_wide(a: u64, b: u64, m: u64) -> u64 {
    debug_assert!(m >= 1);
    ((a as u128 * b as u128) % m as u128) as u64
}

/// Fallback [`Reducer`] over a fixed modulus in `[1, 2^63)`, backed by the
/// doubling multiplication above. No precomputation; construction only
/// validates the modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeMulMod {
    modulus: u64,
}

impl SafeMulMod {
    pub fn new(modulus: u64) -> MathResult<Self> {
        validate_modulus(modulus)?;
        Ok(SafeMulMod { modulus })
    }
}

impl Reducer for SafeMulMod {
    fn modulus(&self) -> u64 {
        self.modulus
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        mul_mod_raw(a, b, self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_mul_mod_small_values() {
        assert_eq!(mul_mod(7, 8, 13).unwrap(), 56 % 13);
        assert_eq!(mul_mod(0, 12345, 97).unwrap(), 0);
        assert_eq!(mul_mod(96, 96, 97).unwrap(), (96 * 96) % 97);
    }

    #[test]
    fn test_mul_mod_rejects_zero_modulus() {
        assert!(matches!(mul_mod(1, 2, 0), Err(MathError::InvalidModulus(_))));
    }

    #[test]
    fn test_mul_mod_rejects_oversized_modulus() {
        assert!(mul_mod(1, 2, 1u64 << 63).is_err());
    }

    #[test]
    fn test_mul_mod_matches_u128_reference() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let m = rng.random_range(1..(1u64 << 63));
            let a = rng.random_range(0..m);
            let b = rng.random_range(0..m);
            let expected = ((a as u128 * b as u128) % m as u128) as u64;
            assert_eq!(mul_mod(a, b, m).unwrap(), expected, "a={} b={} m={}", a, b, m);
        }
    }

    #[test]
    fn test_mul_mod_near_63_bit_limit() {
        let m = (1u64 << 63) - 1;
        let a = m - 1;
        let b = m - 2;
        let expected = ((a as u128 * b as u128) % m as u128) as u64;
        assert_eq!(mul_mod(a, b, m).unwrap(), expected);
    }

    #[test]
    fn test_add_sub_mod() {
        assert_eq!(add_mod(90, 20, 97).unwrap(), 13);
        assert_eq!(sub_mod(5, 20, 97).unwrap(), 82);
        assert_eq!(sub_mod(20, 5, 97).unwrap(), 15);
    }

    #[test]
    fn test_safe_mul_mod_reducer() {
        let reducer = SafeMulMod::new(1_000_000_006).unwrap(); // even modulus
        assert_eq!(reducer.modulus(), 1_000_000_006);
        assert_eq!(
            reducer.mul_mod(999_999_999, 999_999_998),
            ((999_999_999u128 * 999_999_998u128) % 1_000_000_006u128) as u64
        );
    }
}
