// src/integer_math/mod.rs

pub mod barrett;
pub mod division;
pub mod gcd;
pub mod mod_pow;
pub mod montgomery;
pub mod mul_mod;
pub mod reducer_cache;
