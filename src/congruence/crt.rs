// src/congruence/crt.rs

use crate::error::{MathError, MathResult};
use crate::integer_math::gcd::Gcd;
use log::trace;

/// Combines simultaneous congruences `x = r_i (mod m_i)` into one canonical
/// `(residue, modulus)` pair, folding left to right.
///
/// The final modulus is the LCM of all inputs and the residue its canonical
/// representative in `[0, lcm)`. An inconsistent system is an expected
/// outcome, not an error: it is reported through the sentinel `(0, 0)`.
/// The caller is responsible for the LCM fitting in 64 bits.
///
/// # Arguments
/// * `residues` - Target residues; taken modulo the paired modulus, so any
///   i64 representative is accepted
/// * `moduli` - Positive moduli, one per residue
///
/// # Returns
/// `(r, m)` solving all congruences, `(0, 0)` when unsatisfiable,
/// `MathError::InvalidArgument` on mismatched slice lengths, or
/// `MathError::InvalidModulus` on a non-positive modulus.
pub fn combine(residues: &[i64], moduli: &[i64]) -> MathResult<(i64, i64)> {
    if residues.len() != moduli.len() {
        return Err(MathError::InvalidArgument(format!(
            "residue/modulus count mismatch: {} vs {}",
            residues.len(),
            moduli.len()
        )));
    }
    let mut r0: i64 = 0;
    let mut m0: i64 = 1;
    for (&residue, &modulus) in residues.iter().zip(moduli.iter()) {
        if modulus <= 0 {
            return Err(MathError::InvalidModulus(format!(
                "CRT modulus must be positive, got {}",
                modulus
            )));
        }
        let mut r1 = residue.rem_euclid(modulus);
        let mut m1 = modulus;
        // Fold the larger modulus on the left; keeps the overflow analysis
        // one-sided and the divisor check meaningful.
        if m0 < m1 {
            std::mem::swap(&mut r0, &mut r1);
            std::mem::swap(&mut m0, &mut m1);
        }
        if m0 % m1 == 0 {
            // New congruence is redundant or directly contradictory.
            if r0 % m1 != r1 {
                trace!("CRT contradiction: {} mod {} != {}", r0, m1, r1);
                return Ok((0, 0));
            }
            continue;
        }
        let (g, bezout, _) = Gcd::extended(m0, m1);
        if (r1 - r0) % g != 0 {
            trace!(
                "CRT unsatisfiable: ({} - {}) not divisible by gcd {}",
                r1,
                r0,
                g
            );
            return Ok((0, 0));
        }
        // bezout is the coefficient of m0, so (m0/g) * bezout = 1 mod (m1/g)
        let lifted_modulus = m1 / g;
        let step = (r1 - r0) / g % lifted_modulus * bezout % lifted_modulus;
        r0 += step * m0;
        m0 *= lifted_modulus;
        r0 = r0.rem_euclid(m0);
    }
    Ok((r0, m0))
}
