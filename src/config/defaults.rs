//! System-wide default constants.
//!
//! Centralises names and paths shared by the config loader, the predictor
//! and the CLI.

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "SOIL_ADVISOR_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "soil_advisor.toml";

// ============================================================================
// Predictor artifacts
// ============================================================================

/// Default location of the serialized classifier.
pub const MODEL_PATH: &str = "models/classifier.json";

/// Default location of the serialized feature transform (scaler + encoder).
pub const TRANSFORM_PATH: &str = "models/feature_transform.json";

/// Overrides `predictor.model_path` when set.
pub const MODEL_PATH_ENV_VAR: &str = "SOIL_ADVISOR_MODEL_PATH";

/// Overrides `predictor.transform_path` when set.
pub const TRANSFORM_PATH_ENV_VAR: &str = "SOIL_ADVISOR_TRANSFORM_PATH";

// ============================================================================
// Neutral defaults
// ============================================================================

/// Sub-score substituted for a factor whose reading is missing.
pub const UNKNOWN_FACTOR_SCORE: f64 = 0.5;
