// src/factorization/mod.rs

pub mod factorization;
pub mod factorizer;
pub mod pollard_rho;

pub use factorization::Factorization;
pub use factorizer::{factor, factor_with_retries};
