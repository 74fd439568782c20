// src/factorization/factorization.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Multiset of (prime, exponent) pairs with the invariant that the product
/// of `prime^exponent` over all entries reconstructs the factored integer.
/// Built incrementally by the factorizer; every key has been validated by
/// the primality tester before insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization(BTreeMap<u64, u32>);

impl Factorization {
    pub fn new() -> Self {
        Factorization(BTreeMap::new())
    }

    /// Records one more occurrence of `prime`.
    pub fn add(&mut self, prime: u64) {
        self.add_power(prime, 1);
    }

    /// Records `exponent` occurrences of `prime` at once.
    pub fn add_power(&mut self, prime: u64, exponent: u32) {
        if exponent == 0 {
            return;
        }
        *self.0.entry(prime).or_insert(0) += exponent;
    }

    /// Multiplicity of `prime` in the factorization (0 when absent).
    pub fn exponent_of(&self, prime: u64) -> u32 {
        self.0.get(&prime).copied().unwrap_or(0)
    }

    /// Reconstructs the original integer. The invariant guarantees this fits
    /// in u64 for any factorization the kernel produced.
    pub fn product(&self) -> u64 {
        self.0
            .iter()
            .fold(1u64, |acc, (&p, &e)| acc * p.pow(e))
    }

    /// Number of divisors of the factored integer.
    pub fn divisor_count(&self) -> u64 {
        self.0.values().fold(1u64, |acc, &e| acc * (e as u64 + 1))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u64, &u32)> {
        self.0.iter()
    }

    pub fn distinct_primes(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        let factors: Vec<String> = self
            .0
            .iter()
            .map(|(p, e)| format!("{}^{}", p, e))
            .collect();
        write!(f, "{}", factors.join(" * "))
    }
}
