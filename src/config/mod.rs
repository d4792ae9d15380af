//! Advisor Configuration Module
//!
//! Classification thresholds and predictor artifact locations, loaded from a
//! TOML file so agronomists can calibrate against local soil-test norms.
//!
//! ## Loading Order
//!
//! 1. `SOIL_ADVISOR_CONFIG` environment variable (path to TOML file)
//! 2. `soil_advisor.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(AdvisorConfig::load());
//!
//! let cutoff = config::get().organic_carbon.rule_cutoff;
//! ```
//!
//! When nothing was installed, `get()` hands out the built-in defaults, so the
//! scoring functions stay usable from tests and embedding callers.

mod advisor_config;
pub mod defaults;
pub mod validation;

pub use advisor_config::*;

use std::sync::OnceLock;

/// Global advisor configuration, installed once at startup.
static ADVISOR_CONFIG: OnceLock<AdvisorConfig> = OnceLock::new();

/// Built-in defaults served when no configuration was installed.
static DEFAULT_CONFIG: OnceLock<AdvisorConfig> = OnceLock::new();

/// Install the global advisor configuration.
///
/// Only the first call takes effect; later calls are ignored with a warning.
pub fn init(config: AdvisorConfig) {
    if ADVISOR_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the active configuration.
pub fn get() -> &'static AdvisorConfig {
    ADVISOR_CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT_CONFIG.get_or_init(AdvisorConfig::default))
}

/// Check whether a configuration has been installed.
pub fn is_initialized() -> bool {
    ADVISOR_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_without_init_serves_defaults() {
        if !is_initialized() {
            assert_eq!(get().ph_bands.neutral_max, 7.5);
        }
    }
}
