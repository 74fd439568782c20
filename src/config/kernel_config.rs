// src/config/kernel_config.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main kernel configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,

    /// Factorization tuning
    pub factorization: FactorizationConfig,

    /// Combinatorics table tuning
    pub combinatorics: CombinatoricsConfig,
}

/// Factorization tuning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorizationConfig {
    /// Pollard rho polynomial-constant retries before giving up (default: 24)
    pub rho_retries: u32,
}

/// Combinatorics table tuning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinatoricsConfig {
    /// Factorial entries precomputed at table construction (default: 128)
    pub initial_capacity: usize,

    /// Per-modulus reducer cache slots (default: 16)
    pub reducer_cache_capacity: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            log_level: "info".to_string(),
            factorization: FactorizationConfig::default(),
            combinatorics: CombinatoricsConfig::default(),
        }
    }
}

impl Default for FactorizationConfig {
    fn default() -> Self {
        FactorizationConfig { rho_retries: 24 }
    }
}

impl Default for CombinatoricsConfig {
    fn default() -> Self {
        CombinatoricsConfig {
            initial_capacity: 128,
            reducer_cache_capacity: 16,
        }
    }
}

impl KernelConfig {
    // Defaults shared by every load path; file and env sources layer on top.
    fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("log_level", "info")?
            .set_default("factorization.rho_retries", 24)?
            .set_default("combinatorics.initial_capacity", 128)?
            .set_default("combinatorics.reducer_cache_capacity", 16)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        // Override with environment variables (prefix: MODMATH_)
        let builder = builder.add_source(
            Environment::with_prefix("MODMATH")
                .separator("_")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::base_builder()?;
        if Path::new("modmath.toml").exists() {
            builder = builder.add_source(File::with_name("modmath.toml"));
        }
        Self::finish(builder)
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::base_builder()?;
        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }
        Self::finish(builder)
    }
}
