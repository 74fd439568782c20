// src/integer_math/barrett.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::mod_pow::Reducer;

const MASK31: u64 = (1 << 31) - 1;

/// Barrett reduction context for a fixed modulus `m` with `1 <= m < 2^31`.
///
/// Construction computes the reciprocal `r = floor(2^62 / m)` (up to 63 bits)
/// split into high/low 31-bit halves so that `reduce` never needs a product
/// wider than 64 bits. `reduce(x)` is valid for any `x < m^2` and costs a
/// handful of multiplications, shifts, and corrective subtractions - no
/// division. Created once per distinct modulus and reused for every
/// reduction against it; never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrettReducer {
    modulus: u64,
    recip_hi: u64,
    recip_lo: u64,
}

impl BarrettReducer {
    /// Builds the reduction context for `modulus`.
    ///
    /// # Returns
    /// `MathError::InvalidModulus` when `modulus` is zero or at/above 2^31.
    pub fn new(modulus: u64) -> MathResult<Self> {
        if modulus == 0 {
            return Err(MathError::InvalidModulus("modulus must be positive".into()));
        }
        if modulus >= 1 << 31 {
            return Err(MathError::InvalidModulus(format!(
                "Barrett reduction requires modulus < 2^31, got {}",
                modulus
            )));
        }
        let recip = (1u64 << 62) / modulus;
        Ok(BarrettReducer {
            modulus,
            recip_hi: recip >> 31,
            recip_lo: recip & MASK31,
        })
    }

    /// Reduces `x` modulo the bound modulus, for `0 <= x < m^2`.
    ///
    /// Estimates the quotient as `x * floor(2^62 / m) / 2^62` using split
    /// 31-bit half products. The estimate never overshoots; the dropped
    /// fractional parts make it undershoot by at most a few multiples of `m`,
    /// fixed up by the trailing subtraction loop.
    pub fn reduce(&self, x: u64) -> u64 {
        debug_assert!(self.modulus == 1 || x < self.modulus * self.modulus);
        let x_hi = x >> 31;
        let x_lo = x & MASK31;
        let mid = x_hi * self.recip_lo + x_lo * self.recip_hi + ((x_lo * self.recip_lo) >> 31);
        let q = x_hi * self.recip_hi + (mid >> 31);
        let mut r = x - q * self.modulus;
        while r >= self.modulus {
            r -= self.modulus;
        }
        r
    }
}

impl Reducer for BarrettReducer {
    fn modulus(&self) -> u64 {
        self.modulus
    }

    // Operands are reduced below 2^31 first, so the plain product stays below
    // 2^62 and within reduce()'s m^2 input range.
    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        self.reduce((a % self.modulus) * (b % self.modulus))
    }
}
