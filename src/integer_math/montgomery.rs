// src/integer_math/montgomery.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::mod_pow::Reducer;

const R_LOG: u32 = 31;
const R_MASK: u64 = (1 << R_LOG) - 1;

/// Montgomery (REDC) reduction context for a fixed odd modulus `m < 2^31`,
/// with `R = 2^31`.
///
/// Construction computes `m^-1 mod 2^31` by Newton bit-doubling refinement,
/// plus `R^2 mod m` and `R^3 mod m` for moving values into the Montgomery
/// representation. Functionally interchangeable with `BarrettReducer` for odd
/// moduli; the faster choice when many multiplications share one modulus and
/// the conversion overhead is amortized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MontgomeryReducer {
    modulus: u64,
    neg_inv: u64, // -m^-1 mod 2^31
    r2: u64,      // R^2 mod m
    r3: u64,      // R^3 mod m
}

impl MontgomeryReducer {
    /// Builds the reduction context for an odd `modulus` below 2^31.
    pub fn new(modulus: u64) -> MathResult<Self> {
        if modulus == 0 {
            return Err(MathError::InvalidModulus("modulus must be positive".into()));
        }
        if modulus >= 1 << R_LOG {
            return Err(MathError::InvalidModulus(format!(
                "Montgomery reduction requires modulus < 2^31, got {}",
                modulus
            )));
        }
        if modulus & 1 == 0 {
            return Err(MathError::InvalidModulus(format!(
                "Montgomery reduction requires an odd modulus, got {}",
                modulus
            )));
        }
        // Newton refinement: x_{k+1} = x_k * (2 - m * x_k) doubles the number
        // of correct low bits each round; x_0 = m is already exact mod 2^3.
        let mut inv = modulus;
        for _ in 0..4 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(modulus.wrapping_mul(inv))) & R_MASK;
        }
        debug_assert_eq!((inv * modulus) & R_MASK, 1);
        let r_mod = (1u64 << R_LOG) % modulus;
        let r2 = (r_mod * r_mod) % modulus;
        let r3 = (r2 * r_mod) % modulus;
        Ok(MontgomeryReducer {
            modulus,
            neg_inv: ((1u64 << R_LOG) - inv) & R_MASK,
            r2,
            r3,
        })
    }

    /// REDC: for `0 <= x < m * 2^31`, returns `x * R^-1 mod m` in O(1).
    pub fn reduce(&self, x: u64) -> u64 {
        debug_assert!(x < self.modulus << R_LOG || self.modulus == 1);
        let q = ((x & R_MASK) * self.neg_inv) & R_MASK;
        let t = (x + q * self.modulus) >> R_LOG;
        if t >= self.modulus {
            t - self.modulus
        } else {
            t
        }
    }

    /// Converts `a` into Montgomery form: `a * R mod m`.
    pub fn to_montgomery(&self, a: u64) -> u64 {
        self.reduce((a % self.modulus) * self.r2)
    }

    /// Converts `a` into the Montgomery form of its square: `a^2 * R mod m`.
    /// One extra REDC against `R^3` instead of two conversions.
    pub fn to_montgomery_square(&self, a: u64) -> u64 {
        let a = a % self.modulus;
        self.reduce(self.reduce(a * a) * self.r3)
    }

    /// Converts out of Montgomery form: `a * R^-1 mod m`.
    pub fn from_montgomery(&self, a: u64) -> u64 {
        self.reduce(a)
    }

    /// Product of two values already in Montgomery form, result in
    /// Montgomery form.
    pub fn mul_montgomery(&self, a: u64, b: u64) -> u64 {
        self.reduce(a * b)
    }
}

impl Reducer for MontgomeryReducer {
    fn modulus(&self) -> u64 {
        self.modulus
    }

    // Plain-residue contract: one REDC for the product (giving a*b*R^-1),
    // one REDC against R^2 to strip the stray R^-1.
    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        let a = a % self.modulus;
        let b = b % self.modulus;
        self.reduce(self.reduce(a * b) * self.r2)
    }
}
