// src/congruence/mod.rs

pub mod crt;
pub mod floor_sum;

pub use crt::combine;
pub use floor_sum::floor_sum;
