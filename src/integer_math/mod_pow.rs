// src/integer_math/mod_pow.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::barrett::BarrettReducer;
use crate::integer_math::montgomery::MontgomeryReducer;
use crate::integer_math::mul_mod::SafeMulMod;

/// A fixed-modulus multiplication context. Implementors must return
/// `a * b mod modulus()` for arbitrary plain (non-Montgomery) operands.
///
/// `pow_with` and the rest of the kernel are generic over this seam, so the
/// same exponentiation loop runs on Barrett, Montgomery, or the doubling
/// fallback without caring which reduction strategy is underneath.
pub trait Reducer {
    fn modulus(&self) -> u64;
    fn mul_mod(&self, a: u64, b: u64) -> u64;
}

/// Binary exponentiation (square-and-multiply) over any reducer.
///
/// Contract: `pow_with(n, 0, r) == 1 mod m` for every `n`, and the result
/// matches the mathematical `n^e mod m` for all `e >= 0`.
pub fn pow_with<R: Reducer>(base: u64, mut exponent: u64, reducer: &R) -> u64 {
    let m = reducer.modulus();
    if m == 1 {
        return 0;
    }
    let mut result = 1u64;
    let mut base = base % m;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = reducer.mul_mod(result, base);
        }
        base = reducer.mul_mod(base, base);
        exponent >>= 1;
    }
    result
}

/// `base^exponent mod modulus` with automatic reducer selection: Montgomery
/// for odd moduli below 2^31, Barrett for the remaining sub-2^31 moduli, and
/// the overflow-safe doubling multiplication for everything up to 2^63.
pub fn pow_mod(base: u64, exponent: u64, modulus: u64) -> MathResult<u64> {
    if modulus == 0 {
        return Err(MathError::InvalidModulus("modulus must be positive".into()));
    }
    if modulus == 1 {
        return Ok(0);
    }
    if modulus < 1 << 31 {
        if modulus & 1 == 1 {
            let reducer = MontgomeryReducer::new(modulus)?;
            return Ok(pow_montgomery(base, exponent, &reducer));
        }
        let reducer = BarrettReducer::new(modulus)?;
        return Ok(pow_with(base, exponent, &reducer));
    }
    let reducer = SafeMulMod::new(modulus)?;
    Ok(pow_with(base, exponent, &reducer))
}

/// Square-and-multiply kept in Montgomery form throughout, converting once on
/// entry and once on exit. This is where the conversion overhead actually
/// amortizes, unlike the plain-residue `Reducer::mul_mod` contract.
pub fn pow_montgomery(base: u64, mut exponent: u64, reducer: &MontgomeryReducer) -> u64 {
    if reducer.modulus() == 1 {
        return 0;
    }
    let mut result = reducer.to_montgomery(1);
    let mut base = reducer.to_montgomery(base);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = reducer.mul_montgomery(result, base);
        }
        base = reducer.mul_montgomery(base, base);
        exponent >>= 1;
    }
    reducer.from_montgomery(result)
}

/// Fast path for the NTT prime 998244353: the reduction is inlined, no
/// context construction per call. Products of two residues stay below 2^60.
pub fn pow_mod_998244353(base: u64, exponent: u64) -> u64 {
    pow_fixed::<998_244_353>(base, exponent)
}

/// Fast path for the prime 1000000007.
pub fn pow_mod_1000000007(base: u64, exponent: u64) -> u64 {
    pow_fixed::<1_000_000_007>(base, exponent)
}

fn pow_fixed<const M: u64>(base: u64, mut exponent: u64) -> u64 {
    let mut result = 1u64;
    let mut base = base % M;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % M;
        }
        base = base * base % M;
        exponent >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_zero_exponent_is_one() {
        assert_eq!(pow_mod(0, 0, 97).unwrap(), 1);
        assert_eq!(pow_mod(12345, 0, 1_000_000_007).unwrap(), 1);
        assert_eq!(pow_mod(5, 0, 1).unwrap(), 0); // everything is 0 mod 1
    }

    #[test]
    fn test_pow_known_values() {
        assert_eq!(pow_mod(2, 10, 1_000_000_007).unwrap(), 1024);
        assert_eq!(pow_mod(3, 4, 5).unwrap(), 81 % 5);
        // Fermat: a^(p-1) = 1 mod p
        assert_eq!(pow_mod(2, 996, 997).unwrap(), 1);
        assert_eq!(pow_mod(123_456_789, 998_244_352, 998_244_353).unwrap(), 1);
    }

    #[test]
    fn test_pow_rejects_zero_modulus() {
        assert!(pow_mod(2, 3, 0).is_err());
    }

    #[test]
    fn test_all_reducer_paths_agree() {
        // odd < 2^31 (Montgomery), even < 2^31 (Barrett), >= 2^31 (doubling)
        for &(base, exp) in &[(2u64, 63u64), (7, 100), (999_999_937, 12345)] {
            let odd = 1_000_000_007u64;
            let even = 1_000_000_006u64;
            let big = (1u64 << 61) - 1;
            let mont = MontgomeryReducer::new(odd).unwrap();
            let barrett = BarrettReducer::new(odd).unwrap();
            assert_eq!(
                pow_montgomery(base, exp, &mont),
                pow_with(base, exp, &barrett)
            );
            assert_eq!(
                pow_mod(base, exp, even).unwrap(),
                pow_naive(base, exp, even)
            );
            assert_eq!(pow_mod(base, exp, big).unwrap(), pow_naive(base, exp, big));
        }
    }

    #[test]
    fn test_pow_by_one_is_identity_on_residues() {
        for &m in &[97u64, 998_244_353, 1_000_000_006, (1u64 << 61) - 1] {
            for &(n, e) in &[(2u64, 31u64), (12345, 678), (0, 5)] {
                let r = pow_mod(n, e, m).unwrap();
                assert_eq!(pow_mod(r, 1, m).unwrap(), r);
            }
        }
    }

    #[test]
    fn test_exponent_additivity() {
        let m = 998_244_353u64;
        for &(a, b) in &[(3u64, 8u64), (0, 17), (100, 1000), (65535, 1)] {
            let lhs = pow_mod(7, a + b, m).unwrap();
            let rhs = (pow_mod(7, a, m).unwrap() as u128 * pow_mod(7, b, m).unwrap() as u128
                % m as u128) as u64;
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn test_fixed_modulus_fast_paths() {
        for &(base, exp) in &[(0u64, 5u64), (2, 20), (998_244_352, 2), (1_000_000_006, 3)] {
            assert_eq!(
                pow_mod_998244353(base, exp),
                pow_mod(base, exp, 998_244_353).unwrap()
            );
            assert_eq!(
                pow_mod_1000000007(base, exp),
                pow_mod(base, exp, 1_000_000_007).unwrap()
            );
        }
    }

    fn pow_naive(base: u64, exp: u64, m: u64) -> u64 {
        let mut r = 1u128;
        let b = (base % m) as u128;
        for _ in 0..exp {
            r = r * b % m as u128;
        }
        r as u64
    }
}
