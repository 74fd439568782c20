// src/integer_math/gcd.rs

use num::Integer;

pub struct Gcd;

impl Gcd {
    pub fn find_gcd(numbers: &[u64]) -> u64 {
        numbers.iter().fold(0, |acc, &x| acc.gcd(&x))
    }

    pub fn find_gcd_pair(left: u64, right: u64) -> u64 {
        left.gcd(&right)
    }

    pub fn find_lcm(numbers: &[u64]) -> u64 {
        numbers.iter().fold(1, |acc, &x| Self::find_lcm_pair(acc, x))
    }

    pub fn find_lcm_pair(left: u64, right: u64) -> u64 {
        if left == 0 || right == 0 {
            return 0;
        }
        left / left.gcd(&right) * right
    }

    pub fn are_coprime(numbers: &[u64]) -> bool {
        Self::find_gcd(numbers) == 1
    }

    /// Bezout identity: returns `(g, x, y)` with `left*x + right*y = g = gcd`.
    pub fn extended(left: i64, right: i64) -> (i64, i64, i64) {
        let e = left.extended_gcd(&right);
        (e.gcd, e.x, e.y)
    }
}
