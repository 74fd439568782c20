// src/factorization/pollard_rho.rs
//
// Pollard's rho with Brent-style cycle detection over x -> x^2 + c mod n.
// Expected O(n^(1/4)) per found divisor; gcd calls are batched across each
// doubling run-length so their cost amortizes away.

use crate::error::{MathError, MathResult};
use crate::integer_math::mul_mod::mul_mod_wide;
use log::debug;
use num::integer::gcd;

/// Per-run gcd batch length. Products of |x - y| differences accumulate for
/// this many steps before one gcd is taken.
const GCD_BATCH: u64 = 128;

/// Finds one nontrivial divisor (not necessarily prime) of a composite `n`.
///
/// Runs the rho iteration with additive constant `c = 1`, incrementing `c`
/// and restarting whenever a cycle closes without yielding a useful gcd.
/// The retry loop is explicitly bounded: exhausting it reports
/// `MathError::NoFactorFound` instead of recursing forever.
///
/// # Arguments
/// * `n` - The composite to split; must be > 1 and must not be prime
/// * `max_retries` - Budget of polynomial constants to try
///
/// # Returns
/// A divisor `d` with `1 < d < n`, or an error for invalid input or an
/// exhausted retry budget.
pub fn find_divisor(n: u64, max_retries: u32) -> MathResult<u64> {
    if n < 2 {
        return Err(MathError::InvalidArgument(format!(
            "cannot split {}, expected a composite > 1",
            n
        )));
    }
    if n % 2 == 0 {
        return Ok(2);
    }
    for retry in 0..max_retries {
        let c = retry as u64 + 1;
        match rho_with_constant(n, c) {
            Some(divisor) => {
                debug!("rho split {} with c = {}: divisor {}", n, c, divisor);
                return Ok(divisor);
            }
            None => {
                debug!("rho cycle on {} with c = {} gave no useful gcd, retrying", n, c);
            }
        }
    }
    Err(MathError::NoFactorFound {
        n,
        retries: max_retries,
    })
}

/// One Brent run over `x -> x^2 + c mod n`. Returns a nontrivial divisor, or
/// `None` when the detected cycle only ever produced gcds of 1 or `n`.
fn rho_with_constant(n: u64, c: u64) -> Option<u64> {
    let c = c % n;
    let step = |x: u64| {
        let squared = mul_mod_wide(x, x, n);
        let next = squared.wrapping_add(c);
        // squared + c < 2n; wrap-around only happens when n itself is huge,
        // and subtracting n lands back in range either way
        if next >= n || next < squared {
            next.wrapping_sub(n)
        } else {
            next
        }
    };

    let mut y = 2u64;
    let mut run_length = 1u64;
    let mut product = 1u64;
    let mut divisor = 1u64;
    let mut anchor = y;
    let mut checkpoint = y;

    while divisor == 1 {
        anchor = y;
        for _ in 0..run_length {
            y = step(y);
        }
        let mut done = 0u64;
        while done < run_length && divisor == 1 {
            checkpoint = y;
            let batch = GCD_BATCH.min(run_length - done);
            for _ in 0..batch {
                y = step(y);
                product = mul_mod_wide(product, anchor.abs_diff(y), n);
            }
            divisor = gcd(product, n);
            done += batch;
        }
        run_length *= 2;
    }

    if divisor == n {
        // The batch overshot the cycle; replay it one step at a time.
        loop {
            checkpoint = step(checkpoint);
            divisor = gcd(anchor.abs_diff(checkpoint), n);
            if divisor > 1 {
                break;
            }
        }
    }

    if divisor == n {
        None
    } else {
        Some(divisor)
    }
}
