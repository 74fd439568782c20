// src/lib.rs

pub mod combinatorics;
pub mod config;
pub mod congruence;
pub mod error;
pub mod factorization;
pub mod integer_math;
pub mod primality;
