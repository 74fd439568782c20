// src/config/mod.rs

pub mod kernel_config;

// Re-export main types for convenience
pub use kernel_config::{CombinatoricsConfig, FactorizationConfig, KernelConfig};
