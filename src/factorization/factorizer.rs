// src/factorization/factorizer.rs

use crate::error::{MathError, MathResult};
use crate::factorization::factorization::Factorization;
use crate::factorization::pollard_rho::find_divisor;
use crate::primality::miller_rabin::is_prime;
use log::debug;

/// Default polynomial-retry budget handed to Pollard's rho. Each retry is a
/// fresh additive constant; a handful has always sufficed for 64-bit inputs.
pub const DEFAULT_RHO_RETRIES: u32 = 24;

/// Full prime factorization of `n >= 1`.
///
/// Trial-divides out 2, 3, 5, 7 (recording multiplicities), then repeatedly
/// extracts one verified prime factor of the remaining cofactor - directly
/// when the cofactor itself passes the primality test, otherwise by
/// splitting it with Pollard's rho and descending into the divisor - and
/// divides it out as often as it goes.
///
/// # Returns
/// The (prime, exponent) multiset whose product reconstructs `n` exactly.
/// `factor(1)` is the empty multiset. `n == 0` is a caller error.
pub fn factor(n: u64) -> MathResult<Factorization> {
    factor_with_retries(n, DEFAULT_RHO_RETRIES)
}

/// [`factor`] with an explicit rho retry budget (see `KernelConfig`).
pub fn factor_with_retries(n: u64, rho_retries: u32) -> MathResult<Factorization> {
    if n == 0 {
        return Err(MathError::InvalidArgument(
            "cannot factor 0, input must be positive".into(),
        ));
    }
    let mut factors = Factorization::new();
    let mut cofactor = n;
    for p in [2u64, 3, 5, 7] {
        while cofactor % p == 0 {
            factors.add(p);
            cofactor /= p;
        }
    }
    while cofactor > 1 {
        let p = extract_prime_factor(cofactor, rho_retries)?;
        debug_assert!(is_prime(p));
        while cofactor % p == 0 {
            factors.add(p);
            cofactor /= p;
        }
        debug!("peeled prime {} from {}, cofactor now {}", p, n, cofactor);
    }
    debug!("factored {} -> {}", n, factors);
    Ok(factors)
}

/// Finds one prime factor of `m > 1`: `m` itself when prime, otherwise a rho
/// split followed by descent into the (strictly smaller) divisor. Every
/// value returned has passed the deterministic primality test.
fn extract_prime_factor(m: u64, rho_retries: u32) -> MathResult<u64> {
    let mut candidate = m;
    while !is_prime(candidate) {
        candidate = find_divisor(candidate, rho_retries)?;
    }
    Ok(candidate)
}
