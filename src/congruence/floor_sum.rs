// src/congruence/floor_sum.rs

use crate::error::{MathError, MathResult};

/// Evaluates `sum_{i=0}^{n-1} floor((a*i + b) / m)` in O(log m).
///
/// Uses the Euclidean-like reduction: peel the `a/m` and `b/m` integer parts
/// into the running total, reduce `a, b` modulo `m`, count the staircase
/// steps `y_max`, and swap the roles of the line and the lattice
/// (`n <- y_max`, `m <-> a`) until `y_max` reaches zero. Negative `a` or `b`
/// are normalized upfront with floor semantics, so the identity holds for
/// any arguments whose true sum fits in 64 bits; overflow beyond that is the
/// caller's responsibility.
///
/// # Returns
/// The sum, `MathError::InvalidArgument` for `n < 0`, or
/// `MathError::InvalidModulus` for `m <= 0`.
pub fn floor_sum(n: i64, m: i64, a: i64, b: i64) -> MathResult<i64> {
    if n < 0 {
        return Err(MathError::InvalidArgument(format!(
            "floor_sum needs a non-negative term count, got {}",
            n
        )));
    }
    if m <= 0 {
        return Err(MathError::InvalidModulus(format!(
            "floor_sum modulus must be positive, got {}",
            m
        )));
    }
    let mut answer: i64 = 0;
    let (mut a, mut b) = (a, b);
    if a < 0 {
        let a_mod = a.rem_euclid(m);
        answer -= n * (n - 1) / 2 * ((a_mod - a) / m);
        a = a_mod;
    }
    if b < 0 {
        let b_mod = b.rem_euclid(m);
        answer -= n * ((b_mod - b) / m);
        b = b_mod;
    }
    answer += floor_sum_unsigned(n as u64, m as u64, a as u64, b as u64) as i64;
    Ok(answer)
}

fn floor_sum_unsigned(mut n: u64, mut m: u64, mut a: u64, mut b: u64) -> u64 {
    let mut answer: u64 = 0;
    loop {
        if a >= m {
            answer += n * (n - 1) / 2 * (a / m);
            a %= m;
        }
        if b >= m {
            answer += n * (b / m);
            b %= m;
        }
        let y_max = a * n + b;
        if y_max < m {
            return answer;
        }
        // Count lattice points under the line from the transposed side.
        n = y_max / m;
        b = y_max % m;
        std::mem::swap(&mut m, &mut a);
    }
}
