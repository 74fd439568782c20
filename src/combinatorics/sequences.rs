// src/combinatorics/sequences.rs
//
// Classical counting sequences layered on the factorial cache: Stirling
// numbers of both kinds, Bell numbers, and integer partitions.

use crate::combinatorics::table::{nonnegative, CombinatoricsTable};
use crate::error::MathResult;
use crate::integer_math::mod_pow::pow_with;

impl CombinatoricsTable {
    /// Unsigned Stirling number of the first kind: permutations of `n`
    /// elements with exactly `k` cycles. Recurrence-based, O(n*k).
    pub fn first_stirling(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let n = nonnegative("first_stirling", n)? as usize;
        let k = nonnegative("first_stirling", k)? as usize;
        if k > n {
            return Ok(0);
        }
        // c(i, j) = c(i-1, j-1) + (i-1) * c(i-1, j); in-place with j
        // descending so the previous row is still intact on the right.
        let mut row = vec![0u64; k + 1];
        row[0] = 1;
        for i in 1..=n {
            for j in (0..=k.min(i)).rev() {
                let carried = self.mul(row[j], (i - 1) as u64);
                let promoted = if j > 0 { row[j - 1] } else { 0 };
                row[j] = self.add(promoted, carried);
            }
            // a permutation of i elements has at least one cycle
            row[0] = 0;
        }
        Ok(row[k])
    }

    /// Stirling number of the second kind: partitions of an `n`-set into
    /// exactly `k` nonempty blocks. Uses the alternating closed form
    /// `S(n,k) = sum_j (-1)^(k-j) j^n / (j! (k-j)!)` with the power table
    /// below, so a single call is O(k log n) rather than O(n*k).
    pub fn second_stirling(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let n = nonnegative("second_stirling", n)?;
        let k = nonnegative("second_stirling", k)?;
        if k > n {
            return Ok(0);
        }
        if k == 0 {
            return Ok(if n == 0 { 1 } else { 0 });
        }
        let k = k as usize;
        self.ensure(k);
        let powers = self.power_table(k, n);
        let mut result = 0u64;
        for j in 0..=k {
            let term = self.mul(powers[j], self.mul_invfact_pair(j, k - j));
            result = if (k - j) % 2 == 0 {
                self.add(result, term)
            } else {
                self.sub(result, term)
            };
        }
        Ok(result)
    }

    /// Bell number `B(n)`: partitions of an `n`-set into any number of
    /// blocks.
    pub fn bell(&mut self, n: i64) -> MathResult<u64> {
        self.bell_bounded(n, n)
    }

    /// Partitions of an `n`-set into at most `k` blocks:
    /// `B(n, k) = sum_{j<=k} S(n, j)`. Folding the alternating tails into
    /// one prefix sum keeps the whole evaluation at a single power table.
    pub fn bell_bounded(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let n = nonnegative("bell", n)?;
        let k = nonnegative("bell", k)?;
        if n == 0 {
            return Ok(1);
        }
        if k == 0 {
            return Ok(0);
        }
        let cap = (k.min(n)) as usize;
        self.ensure(cap);
        let powers = self.power_table(cap, n);
        // alternating[t] = sum_{i=0..t} (-1)^i / i!
        let mut alternating = vec![0u64; cap + 1];
        alternating[0] = 1;
        for t in 1..=cap {
            alternating[t] = if t % 2 == 0 {
                self.add(alternating[t - 1], self.invfact[t])
            } else {
                self.sub(alternating[t - 1], self.invfact[t])
            };
        }
        let mut result = 0u64;
        for j in 0..=cap {
            let weight = self.mul(powers[j], self.invfact[j]);
            let term = self.mul(weight, alternating[cap - j]);
            result = self.add(result, term);
        }
        Ok(result)
    }

    /// Partitions of the integer `n` into at most `k` parts, by the
    /// `p(n,k) = p(n,k-1) + p(n-k,k)` recurrence. O(n*k).
    pub fn partition_into(&mut self, n: i64, k: i64) -> MathResult<u64> {
        let n = nonnegative("partition_into", n)? as usize;
        let k = nonnegative("partition_into", k)? as usize;
        if n == 0 {
            return Ok(1);
        }
        if k == 0 {
            return Ok(0);
        }
        let mut counts = vec![0u64; n + 1];
        counts[0] = 1;
        for part in 1..=k.min(n) {
            for total in part..=n {
                counts[total] = self.add(counts[total], counts[total - part]);
            }
        }
        Ok(counts[n])
    }

    /// Partitions of the integer `n`, via Euler's pentagonal-number
    /// recurrence. O(n^1.5).
    pub fn partition(&mut self, n: i64) -> MathResult<u64> {
        let n = nonnegative("partition", n)? as usize;
        let mut counts = vec![0u64; n + 1];
        counts[0] = 1;
        for total in 1..=n {
            let mut value = 0u64;
            let mut k = 1usize;
            loop {
                let pentagonal = k * (3 * k - 1) / 2;
                if pentagonal > total {
                    break;
                }
                let mirrored = k * (3 * k + 1) / 2;
                let mut contribution = counts[total - pentagonal];
                if mirrored <= total {
                    contribution = self.add(contribution, counts[total - mirrored]);
                }
                value = if k % 2 == 1 {
                    self.add(value, contribution)
                } else {
                    self.sub(value, contribution)
                };
                k += 1;
            }
            counts[total] = value;
        }
        Ok(counts[n])
    }

    /// `i^e mod m` for every `i` in `0..=k`, with actual exponentiation only
    /// at prime indices; composites multiply two earlier entries through a
    /// smallest-prime-factor sieve.
    pub(super) fn power_table(&self, k: usize, e: u64) -> Vec<u64> {
        let m = self.modulus();
        let mut powers = vec![0u64; k + 1];
        powers[0] = if e == 0 { 1 % m } else { 0 };
        if k >= 1 {
            powers[1] = 1 % m;
        }
        let mut smallest_factor = vec![0usize; k + 1];
        let mut primes: Vec<usize> = Vec::new();
        for i in 2..=k {
            if smallest_factor[i] == 0 {
                smallest_factor[i] = i;
                primes.push(i);
                powers[i] = pow_with(i as u64, e, &self.reducer);
            } else {
                powers[i] = self.mul(
                    powers[smallest_factor[i]],
                    powers[i / smallest_factor[i]],
                );
            }
            for &p in &primes {
                if p > smallest_factor[i] || i * p > k {
                    break;
                }
                smallest_factor[i * p] = p;
            }
        }
        powers
    }

    fn mul_invfact_pair(&self, a: usize, b: usize) -> u64 {
        self.mul(self.invfact[a], self.invfact[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CombinatoricsTable {
        CombinatoricsTable::new(1_000_000_007).unwrap()
    }

    #[test]
    fn test_power_table_matches_pow() {
        let t = table();
        let powers = t.power_table(20, 11);
        for i in 0..=20u64 {
            let expected = (0..11).fold(1u64, |acc, _| {
                ((acc as u128 * i as u128) % 1_000_000_007) as u64
            });
            assert_eq!(powers[i as usize], expected, "{}^11", i);
        }
        let zeroth = t.power_table(5, 0);
        assert!(zeroth.iter().all(|&v| v == 1), "i^0 = 1 including 0^0");
    }

    #[test]
    fn test_first_stirling_small_triangle() {
        let mut t = table();
        // rows n = 0..5 of unsigned c(n, k)
        let expected: [&[u64]; 6] = [
            &[1],
            &[0, 1],
            &[0, 1, 1],
            &[0, 2, 3, 1],
            &[0, 6, 11, 6, 1],
            &[0, 24, 50, 35, 10, 1],
        ];
        for (n, row) in expected.iter().enumerate() {
            for (k, &value) in row.iter().enumerate() {
                assert_eq!(
                    t.first_stirling(n as i64, k as i64).unwrap(),
                    value,
                    "c({}, {})",
                    n,
                    k
                );
            }
        }
        assert_eq!(t.first_stirling(3, 5).unwrap(), 0);
        assert!(t.first_stirling(-1, 0).is_err());
    }

    #[test]
    fn test_first_stirling_row_sums_to_factorial() {
        let mut t = table();
        for n in 0..=10i64 {
            let sum = (0..=n).try_fold(0u64, |acc, k| {
                t.first_stirling(n, k).map(|v| (acc + v) % 1_000_000_007)
            });
            assert_eq!(sum.unwrap(), t.factorial(n).unwrap(), "row {}", n);
        }
    }

    #[test]
    fn test_second_stirling_small_triangle() {
        let mut t = table();
        let expected: [&[u64]; 6] = [
            &[1],
            &[0, 1],
            &[0, 1, 1],
            &[0, 1, 3, 1],
            &[0, 1, 7, 6, 1],
            &[0, 1, 15, 25, 10, 1],
        ];
        for (n, row) in expected.iter().enumerate() {
            for (k, &value) in row.iter().enumerate() {
                assert_eq!(
                    t.second_stirling(n as i64, k as i64).unwrap(),
                    value,
                    "S({}, {})",
                    n,
                    k
                );
            }
        }
        assert_eq!(t.second_stirling(4, 9).unwrap(), 0);
    }

    #[test]
    fn test_second_stirling_matches_recurrence() {
        let mut t = table();
        let m = 1_000_000_007u64;
        let mut dp = vec![vec![0u64; 13]; 13];
        dp[0][0] = 1;
        for n in 1..13 {
            for k in 1..=n {
                dp[n][k] = (dp[n - 1][k - 1] + k as u64 * dp[n - 1][k]) % m;
            }
        }
        for n in 0..13i64 {
            for k in 0..13i64 {
                assert_eq!(
                    t.second_stirling(n, k).unwrap(),
                    dp[n as usize][k as usize],
                    "S({}, {})",
                    n,
                    k
                );
            }
        }
    }

    #[test]
    fn test_bell_numbers() {
        let mut t = table();
        let expected = [1u64, 1, 2, 5, 15, 52, 203, 877, 4140, 21147, 115975];
        for (n, &b) in expected.iter().enumerate() {
            assert_eq!(t.bell(n as i64).unwrap(), b, "B({})", n);
        }
    }

    #[test]
    fn test_bell_bounded_prefixes() {
        let mut t = table();
        // B(4, k): 0 blocks..4 blocks -> 0, 1, 8, 14, 15
        assert_eq!(t.bell_bounded(4, 0).unwrap(), 0);
        assert_eq!(t.bell_bounded(4, 1).unwrap(), 1);
        assert_eq!(t.bell_bounded(4, 2).unwrap(), 1 + 7);
        assert_eq!(t.bell_bounded(4, 3).unwrap(), 1 + 7 + 6);
        assert_eq!(t.bell_bounded(4, 4).unwrap(), 15);
        // caps beyond n change nothing
        assert_eq!(t.bell_bounded(4, 40).unwrap(), 15);
        assert_eq!(t.bell_bounded(0, 0).unwrap(), 1);
    }

    #[test]
    fn test_partition_into_small_values() {
        let mut t = table();
        // partitions of 5: at most 1 part: 1; 2 parts: 3; 5 parts: 7
        assert_eq!(t.partition_into(5, 1).unwrap(), 1);
        assert_eq!(t.partition_into(5, 2).unwrap(), 3);
        assert_eq!(t.partition_into(5, 5).unwrap(), 7);
        assert_eq!(t.partition_into(0, 3).unwrap(), 1);
        assert_eq!(t.partition_into(5, 0).unwrap(), 0);
        assert_eq!(t.partition_into(6, 3).unwrap(), 7);
    }

    #[test]
    fn test_partition_sequence() {
        let mut t = table();
        let expected = [
            1u64, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56, 77, 101, 135, 176, 231,
        ];
        for (n, &p) in expected.iter().enumerate() {
            assert_eq!(t.partition(n as i64).unwrap(), p, "p({})", n);
        }
        assert_eq!(t.partition(100).unwrap(), 190_569_292);
    }

    #[test]
    fn test_partition_agrees_with_bounded_dp() {
        let mut t = table();
        for n in 0..=60i64 {
            assert_eq!(
                t.partition(n).unwrap(),
                t.partition_into(n, n).unwrap(),
                "p({})",
                n
            );
        }
    }
}
