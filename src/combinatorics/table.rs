// src/combinatorics/table.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::barrett::BarrettReducer;
use crate::integer_math::gcd::Gcd;
use crate::integer_math::mod_pow::Reducer;
use log::debug;

/// Factorial / inverse / inverse-factorial cache over one fixed modulus,
/// with the derived combinatorial functions on top.
///
/// The modulus is intended to be prime: the inverse rows are built with the
/// `inv[i] = -(m/i) * inv[m mod i]` recurrence, which is only meaningful for
/// indices coprime to the modulus. With a composite modulus the pure
/// product-counting operations still work but anything touching an inverse
/// does not; `inverse` itself reports `NoInverse` honestly either way.
///
/// The three sequences grow monotonically on demand (`ensure`) and are the
/// only mutation; one table instance per logical modulus, single writer.
pub struct CombinatoricsTable {
    pub(super) reducer: BarrettReducer,
    pub(super) fact: Vec<u64>,
    pub(super) inv: Vec<u64>,
    pub(super) invfact: Vec<u64>,
}

impl CombinatoricsTable {
    /// Creates an empty table over `modulus`, which must lie in `[2, 2^31)`
    /// (the Barrett precondition; factorial products then fit in 64 bits).
    pub fn new(modulus: u64) -> MathResult<Self> {
        if modulus < 2 {
            return Err(MathError::InvalidModulus(format!(
                "combinatorics modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(CombinatoricsTable {
            reducer: BarrettReducer::new(modulus)?,
            fact: vec![1],
            inv: vec![0],
            invfact: vec![1],
        })
    }

    /// [`new`](Self::new) followed by an upfront `ensure(capacity)`, for
    /// callers that know their working range (see
    /// `KernelConfig::combinatorics.initial_capacity`). Pays the growth cost
    /// once at construction instead of on the first large query.
    pub fn with_initial_capacity(modulus: u64, capacity: usize) -> MathResult<Self> {
        let mut table = Self::new(modulus)?;
        table.ensure(capacity);
        Ok(table)
    }

    pub fn modulus(&self) -> u64 {
        self.reducer.modulus()
    }

    /// Highest index currently covered by the cache.
    pub fn precomputed_bound(&self) -> usize {
        self.fact.len() - 1
    }

    pub(super) fn mul(&self, a: u64, b: u64) -> u64 {
        self.reducer.mul_mod(a, b)
    }

    pub(super) fn add(&self, a: u64, b: u64) -> u64 {
        let m = self.modulus();
        let sum = a % m + b % m;
        if sum >= m {
            sum - m
        } else {
            sum
        }
    }

    pub(super) fn sub(&self, a: u64, b: u64) -> u64 {
        let m = self.modulus();
        let (a, b) = (a % m, b % m);
        if a >= b {
            a - b
        } else {
            a + m - b
        }
    }

    /// Grows `fact`, `inv`, and `invfact` to cover indices `0..=k` using the
    /// three linear recurrences. No-op when already covered.
    pub fn ensure(&mut self, k: usize) {
        if k < self.fact.len() {
            return;
        }
        debug!(
            "growing combinatorics table (mod {}) from {} to {}",
            self.modulus(),
            self.fact.len() - 1,
            k
        );
        let m = self.modulus();
        self.fact.reserve(k + 1 - self.fact.len());
        while self.fact.len() <= k {
            let i = self.fact.len() as u64;
            self.fact.push(self.mul(self.fact[(i - 1) as usize], i));
            let inv_i = if i == 1 {
                1
            } else {
                // inv[i] = -(m / i) * inv[m mod i]; m mod i < i is cached
                self.sub(0, self.mul(self.inv[(m % i) as usize], m / i))
            };
            self.inv.push(inv_i);
            self.invfact
                .push(self.mul(self.invfact[(i - 1) as usize], inv_i));
        }
    }

    /// `n! mod m`. Zero for `n >= m` (a prime modulus divides such
    /// factorials), without growing the cache that far.
    pub fn factorial(&mut self, n: i64) -> MathResult<u64> {
        let n = nonnegative("factorial", n)?;
        if n >= self.modulus() {
            return Ok(0);
        }
        self.ensure(n as usize);
        Ok(self.fact[n as usize])
    }

    /// Modular inverse of `a`, by extended Euclid; errors when
    /// `gcd(a, m) != 1` instead of silently producing a wrong value.
    pub fn inverse(&self, a: u64) -> MathResult<u64> {
        let m = self.modulus();
        let a = a % m;
        let (g, coefficient, _) = Gcd::extended(a as i64, m as i64);
        if g != 1 {
            return Err(MathError::NoInverse {
                element: a,
                modulus: m,
            });
        }
        Ok(coefficient.rem_euclid(m as i64) as u64)
    }

    /// Binomial coefficient `C(n, k) mod m`; `0` for `n < k` by convention,
    /// Lucas' digit-wise product once `n` reaches the modulus.
    pub fn combination(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let n = nonnegative("combination", n)?;
        let k = nonnegative("combination", k)?;
        if k > n {
            return Ok(0);
        }
        if n >= self.modulus() {
            return Ok(self.lucas(n, k));
        }
        Ok(self.combination_cached(n, k))
    }

    // Direct table lookup; requires n < modulus and k <= n.
    fn combination_cached(&mut self, n: u64, k: u64) -> u64 {
        self.ensure(n as usize);
        let numerator = self.fact[n as usize];
        let denominator = self.mul(self.invfact[k as usize], self.invfact[(n - k) as usize]);
        self.mul(numerator, denominator)
    }

    // Lucas' theorem: C(n, k) = prod C(n_i, k_i) over base-m digits.
    fn lucas(&mut self, mut n: u64, mut k: u64) -> u64 {
        let m = self.modulus();
        let mut result = 1;
        while (n > 0 || k > 0) && result != 0 {
            let (n_digit, k_digit) = (n % m, k % m);
            if k_digit > n_digit {
                return 0;
            }
            let digit_choose = self.combination_cached(n_digit, k_digit);
            result = self.mul(result, digit_choose);
            n /= m;
            k /= m;
        }
        result
    }

    /// Falling-factorial count `P(n, k) = n! / (n-k)! mod m`; `0` for `n < k`.
    pub fn permutation(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let _ = nonnegative("permutation", n)?;
        let _ = nonnegative("permutation", k)?;
        if k > n {
            return Ok(0);
        }
        // P(n, k) = C(n, k) * k!, which keeps the n >= m cases routed
        // through Lucas and the vanishing factorial.
        let choose = self.combination(n, k)?;
        let arrangements = self.factorial(k)?;
        Ok(self.mul(choose, arrangements))
    }

    /// Multinomial coefficient: ways to deal `counts` disjoint hands out of
    /// `n` items. Zero when the counts overshoot `n`.
    pub fn multinomial(&mut self, n: i64, counts: &[i64]) -> MathResult<u64> {
        let _ = nonnegative("multinomial", n)?;
        let mut remaining = n;
        let mut result = 1;
        for &count in counts {
            let _ = nonnegative("multinomial", count)?;
            if count > remaining {
                return Ok(0);
            }
            let hand = self.combination(remaining, count)?;
            result = self.mul(result, hand);
            remaining -= count;
        }
        Ok(result)
    }

    /// Combinations with repetition: `C(n + k - 1, k)`.
    pub fn multichoose(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let _ = nonnegative("multichoose", n)?;
        let _ = nonnegative("multichoose", k)?;
        if k == 0 {
            return Ok(1);
        }
        if n == 0 {
            return Ok(0);
        }
        self.combination(n + k - 1, k)
    }

    /// Catalan number `C(2n, n) / (n + 1)`, computed by the subtraction
    /// identity `C(2n, n) - C(2n, n + 1)` so no inverse is needed.
    pub fn catalan(&mut self, n: i64) -> MathResult<u64> {
        let _ = nonnegative("catalan", n)?;
        let central = self.combination(2 * n, n)?;
        let shifted = self.combination(2 * n, n + 1)?;
        Ok(self.sub(central, shifted))
    }
}

pub(super) fn nonnegative(operation: &str, value: i64) -> MathResult<u64> {
    if value < 0 {
        return Err(MathError::InvalidArgument(format!(
            "{} argument must be non-negative, got {}",
            operation, value
        )));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_moduli() {
        assert!(CombinatoricsTable::new(0).is_err());
        assert!(CombinatoricsTable::new(1).is_err());
        assert!(CombinatoricsTable::new(1 << 31).is_err());
        assert!(CombinatoricsTable::new(2).is_ok());
    }

    #[test]
    fn test_with_initial_capacity_precomputes_upfront() {
        let t = CombinatoricsTable::with_initial_capacity(1_000_000_007, 128).unwrap();
        assert_eq!(t.precomputed_bound(), 128);
        assert_eq!(t.fact[128], {
            let mut f = 1u64;
            for i in 1..=128u64 {
                f = ((f as u128 * i as u128) % 1_000_000_007) as u64;
            }
            f
        });
        assert!(CombinatoricsTable::with_initial_capacity(1, 10).is_err());
    }

    #[test]
    fn test_factorial_values() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        assert_eq!(t.factorial(0).unwrap(), 1);
        assert_eq!(t.factorial(1).unwrap(), 1);
        assert_eq!(t.factorial(5).unwrap(), 120);
        assert_eq!(t.factorial(10).unwrap(), 3_628_800);
        assert!(t.factorial(-1).is_err());
    }

    #[test]
    fn test_factorial_at_and_past_the_modulus_is_zero() {
        let mut t = CombinatoricsTable::new(13).unwrap();
        assert_eq!(t.factorial(12).unwrap(), 479_001_600 % 13);
        assert_eq!(t.factorial(13).unwrap(), 0);
        assert_eq!(t.factorial(100).unwrap(), 0);
    }

    #[test]
    fn test_table_growth_is_monotonic() {
        let mut t = CombinatoricsTable::new(97).unwrap();
        assert_eq!(t.precomputed_bound(), 0);
        t.ensure(10);
        assert_eq!(t.precomputed_bound(), 10);
        t.ensure(5); // no shrink
        assert_eq!(t.precomputed_bound(), 10);
    }

    #[test]
    fn test_inverse_row_against_extended_euclid() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        t.ensure(50);
        for i in 1..=50u64 {
            assert_eq!(t.inv[i as usize], t.inverse(i).unwrap(), "inv[{}]", i);
            assert_eq!(t.mul(t.inv[i as usize], i), 1);
        }
    }

    #[test]
    fn test_inverse_rejects_shared_factor() {
        let t = CombinatoricsTable::new(10).unwrap();
        assert_eq!(t.inverse(3).unwrap(), 7); // 3 * 7 = 21 = 1 mod 10
        assert_eq!(
            t.inverse(4),
            Err(MathError::NoInverse {
                element: 4,
                modulus: 10
            })
        );
        assert!(t.inverse(0).is_err());
    }

    #[test]
    fn test_combination_matches_pascals_triangle_mod_13() {
        let mut t = CombinatoricsTable::new(13).unwrap();
        let mut pascal = [[0u64; 13]; 13];
        for n in 0..13 {
            pascal[n][0] = 1;
            for k in 1..=n {
                pascal[n][k] = (pascal[n - 1][k - 1] + pascal[n - 1][k]) % 13;
            }
        }
        for n in 0..13i64 {
            for k in 0..=n {
                assert_eq!(
                    t.combination(n, k).unwrap(),
                    pascal[n as usize][k as usize],
                    "C({}, {}) mod 13",
                    n,
                    k
                );
            }
        }
    }

    #[test]
    fn test_combination_conventions() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        assert_eq!(t.combination(5, 7).unwrap(), 0);
        assert_eq!(t.combination(0, 0).unwrap(), 1);
        assert_eq!(t.combination(10, 3).unwrap(), 120);
        assert!(t.combination(-1, 0).is_err());
        assert!(t.combination(3, -2).is_err());
    }

    #[test]
    fn test_lucas_boundary() {
        for &p in &[13i64, 97, 998_244_353] {
            let mut t = CombinatoricsTable::new(p as u64).unwrap();
            assert_eq!(t.combination(p, 1).unwrap(), 1, "C({p}, 1) mod {p}");
            assert_eq!(t.combination(p, p).unwrap(), 1, "C({p}, {p}) mod {p}");
            assert_eq!(t.combination(p, 2).unwrap(), 0, "C({p}, 2) mod {p}");
        }
    }

    #[test]
    fn test_lucas_against_direct_expansion() {
        // C(20, 7) = 77520; digits of (20, 7) base 13 are (1,4) and (0,7)
        let mut t = CombinatoricsTable::new(13).unwrap();
        assert_eq!(t.combination(20, 7).unwrap(), 77_520 % 13);
        // C(100, 50) mod 13 via Lucas: 100 = (7,9)_13, 50 = (3,11)_13; 11 > 9 -> 0
        assert_eq!(t.combination(100, 50).unwrap(), 0);
    }

    #[test]
    fn test_permutation() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        assert_eq!(t.permutation(5, 2).unwrap(), 20);
        assert_eq!(t.permutation(10, 10).unwrap(), 3_628_800);
        assert_eq!(t.permutation(3, 5).unwrap(), 0);
        assert_eq!(t.permutation(7, 0).unwrap(), 1);
    }

    #[test]
    fn test_multinomial() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        // 10! / (3! 3! 4!) = 4200
        assert_eq!(t.multinomial(10, &[3, 3, 4]).unwrap(), 4200);
        assert_eq!(t.multinomial(5, &[2, 2]).unwrap(), 30); // 5!/(2!2!1!)
        assert_eq!(t.multinomial(4, &[3, 3]).unwrap(), 0); // overshoot
        assert!(t.multinomial(4, &[-1]).is_err());
    }

    #[test]
    fn test_multichoose() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        assert_eq!(t.multichoose(0, 0).unwrap(), 1);
        assert_eq!(t.multichoose(3, 0).unwrap(), 1);
        assert_eq!(t.multichoose(0, 4).unwrap(), 0);
        assert_eq!(t.multichoose(3, 2).unwrap(), 6); // C(4, 2)
        assert_eq!(t.multichoose(5, 3).unwrap(), 35); // C(7, 3)
    }

    #[test]
    fn test_catalan_sequence() {
        let mut t = CombinatoricsTable::new(1_000_000_007).unwrap();
        let expected = [1u64, 1, 2, 5, 14, 42, 132, 429, 1430, 4862];
        for (n, &c) in expected.iter().enumerate() {
            assert_eq!(t.catalan(n as i64).unwrap(), c, "catalan({})", n);
        }
    }
}
