// src/primality/mod.rs

pub mod miller_rabin;

pub use miller_rabin::{is_prime, is_prime_u32, is_prime_u64};
