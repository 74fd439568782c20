// src/error.rs

use thiserror::Error;

/// Error taxonomy for the kernel.
///
/// Every failure is local and deterministic: the caller must fix the input,
/// nothing is retried internally. CRT inconsistency is *not* an error; it is
/// an expected outcome of a well-formed query and is reported through the
/// `(0, 0)` sentinel instead (see `congruence::crt`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// Modulus is zero, or outside the magnitude/parity a reducer supports.
    #[error("invalid modulus: {0}")]
    InvalidModulus(String),

    /// Negative count, non-positive factorization input, and similar caller errors.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested a modular inverse of an element not coprime to the modulus.
    #[error("no modular inverse exists for {element} modulo {modulus}")]
    NoInverse { element: u64, modulus: u64 },

    /// Pollard's rho exhausted its polynomial-retry budget without a factor.
    #[error("no factor of {n} found after {retries} polynomial retries")]
    NoFactorFound { n: u64, retries: u32 },

    /// Exact-mode division with a nonzero remainder.
    #[error("{dividend} is not exactly divisible by {divisor}")]
    NonExactDivision { dividend: i64, divisor: i64 },
}

pub type MathResult<T> = Result<T, MathError>;
