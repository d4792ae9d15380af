//! Advisor Configuration - classification cut points as tunable TOML values
//!
//! Each section implements `Default` with the conventional agronomic cut
//! points, so a missing or partial config file leaves behaviour unchanged.
//! A reading that sits exactly on a pH edge belongs to the lower band. Every
//! other cut point starts the band above it (`*_below`, `*_from`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::{HealthCategory, NutrientStatus, PhBand};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the recommendation core.
///
/// Load with `AdvisorConfig::load()` which searches:
/// 1. `$SOIL_ADVISOR_CONFIG` env var
/// 2. `./soil_advisor.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// pH band edges
    #[serde(default)]
    pub ph_bands: PhBandConfig,

    /// N / P / K status cut points
    #[serde(default)]
    pub nutrients: NutrientConfig,

    /// Organic carbon scoring bands and the organic-rule cutoff
    #[serde(default)]
    pub organic_carbon: OrganicCarbonConfig,

    /// EC salinity bands
    #[serde(default)]
    pub salinity: SalinityConfig,

    /// Soil-health category thresholds
    #[serde(default)]
    pub soil_health: SoilHealthConfig,

    /// Statistical predictor artifacts
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl AdvisorConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SOIL_ADVISOR_CONFIG` environment variable
    /// 2. `./soil_advisor.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded advisor config from SOIL_ADVISOR_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from SOIL_ADVISOR_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "SOIL_ADVISOR_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./soil_advisor.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded advisor config from ./soil_advisor.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./soil_advisor.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No soil_advisor.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings, never as errors.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Advisor config saved");
        Ok(())
    }

    /// Validate all cut points for internal consistency.
    ///
    /// Rules:
    /// - Every value must be finite
    /// - Band edges must be strictly ascending
    /// - Soil-health thresholds must lie in (0, 1] and be strictly descending
    ///   from Excellent to Moderate
    /// - Artifact paths must be set while the predictor is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let ph = &self.ph_bands;
        Self::check_ascending(
            "ph_bands",
            &[
                ("strongly_acidic_max", ph.strongly_acidic_max),
                ("moderately_acidic_max", ph.moderately_acidic_max),
                ("neutral_max", ph.neutral_max),
                ("slightly_alkaline_max", ph.slightly_alkaline_max),
            ],
            &mut errors,
        );

        let n = &self.nutrients;
        Self::check_ascending(
            "nutrients.nitrogen",
            &[
                ("nitrogen_low_below", n.nitrogen_low_below),
                ("nitrogen_high_from", n.nitrogen_high_from),
            ],
            &mut errors,
        );
        Self::check_ascending(
            "nutrients.phosphorus",
            &[
                ("phosphorus_low_below", n.phosphorus_low_below),
                ("phosphorus_high_from", n.phosphorus_high_from),
            ],
            &mut errors,
        );
        Self::check_ascending(
            "nutrients.potassium",
            &[
                ("potassium_low_below", n.potassium_low_below),
                ("potassium_high_from", n.potassium_high_from),
            ],
            &mut errors,
        );

        let oc = &self.organic_carbon;
        Self::check_ascending(
            "organic_carbon",
            &[
                ("low_below", oc.low_below),
                ("medium_below", oc.medium_below),
                ("good_below", oc.good_below),
            ],
            &mut errors,
        );
        if !oc.rule_cutoff.is_finite() || oc.rule_cutoff <= 0.0 {
            errors.push(format!(
                "organic_carbon.rule_cutoff must be a positive finite number (got {})",
                oc.rule_cutoff
            ));
        }

        let ec = &self.salinity;
        Self::check_ascending(
            "salinity",
            &[
                ("non_saline_below", ec.non_saline_below),
                ("slightly_saline_below", ec.slightly_saline_below),
            ],
            &mut errors,
        );

        let sh = &self.soil_health;
        Self::check_ascending(
            "soil_health",
            &[
                ("moderate_from", sh.moderate_from),
                ("good_from", sh.good_from),
                ("excellent_from", sh.excellent_from),
            ],
            &mut errors,
        );
        for (name, value) in [
            ("moderate_from", sh.moderate_from),
            ("good_from", sh.good_from),
            ("excellent_from", sh.excellent_from),
        ] {
            if value.is_finite() && (value <= 0.0 || value > 1.0) {
                errors.push(format!(
                    "soil_health.{name} = {value:.3} must lie in (0, 1]"
                ));
            }
        }

        let pr = &self.predictor;
        if pr.enabled {
            if pr.model_path.as_os_str().is_empty() {
                errors.push("predictor.model_path must be set while the predictor is enabled".to_string());
            }
            if pr.transform_path.as_os_str().is_empty() {
                errors.push(
                    "predictor.transform_path must be set while the predictor is enabled".to_string(),
                );
            }
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_ascending(section: &str, edges: &[(&str, f64)], errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass; catch them explicitly
        if let Some((name, value)) = edges.iter().find(|(_, v)| !v.is_finite()) {
            errors.push(format!("{section}.{name}: value must be finite (got {value})"));
            return;
        }
        for pair in edges.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if upper <= lower {
                errors.push(format!(
                    "{section}: {upper_name} ({upper:.3}) must be greater than {lower_name} ({lower:.3})"
                ));
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// pH Bands
// ============================================================================

/// Inclusive upper edges of the pH bands. A reading exactly on an edge
/// belongs to the lower band; anything above `slightly_alkaline_max` is
/// strongly alkaline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhBandConfig {
    #[serde(default = "default_strongly_acidic_max")]
    pub strongly_acidic_max: f64,

    #[serde(default = "default_moderately_acidic_max")]
    pub moderately_acidic_max: f64,

    #[serde(default = "default_neutral_max")]
    pub neutral_max: f64,

    #[serde(default = "default_slightly_alkaline_max")]
    pub slightly_alkaline_max: f64,
}

fn default_strongly_acidic_max() -> f64 { 5.5 }
fn default_moderately_acidic_max() -> f64 { 6.5 }
fn default_neutral_max() -> f64 { 7.5 }
fn default_slightly_alkaline_max() -> f64 { 8.5 }

impl Default for PhBandConfig {
    fn default() -> Self {
        Self {
            strongly_acidic_max: default_strongly_acidic_max(),
            moderately_acidic_max: default_moderately_acidic_max(),
            neutral_max: default_neutral_max(),
            slightly_alkaline_max: default_slightly_alkaline_max(),
        }
    }
}

impl PhBandConfig {
    /// Band for a pH reading; `Unknown` when the reading is missing.
    pub fn band(&self, ph: Option<f64>) -> PhBand {
        let Some(ph) = ph else {
            return PhBand::Unknown;
        };
        if ph <= self.strongly_acidic_max {
            PhBand::StronglyAcidic
        } else if ph <= self.moderately_acidic_max {
            PhBand::ModeratelyAcidic
        } else if ph <= self.neutral_max {
            PhBand::Neutral
        } else if ph <= self.slightly_alkaline_max {
            PhBand::SlightlyAlkaline
        } else {
            PhBand::StronglyAlkaline
        }
    }
}

// ============================================================================
// Nutrient Status
// ============================================================================

/// N / P / K cut points. Values below `*_low_below` are low, values at or
/// above `*_high_from` are high, everything between is adequate.
///
/// The same cut points drive both the soil-health sub-scores and the rule
/// engine's status labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientConfig {
    #[serde(default = "default_nitrogen_low_below")]
    pub nitrogen_low_below: f64,

    #[serde(default = "default_nitrogen_high_from")]
    pub nitrogen_high_from: f64,

    #[serde(default = "default_phosphorus_low_below")]
    pub phosphorus_low_below: f64,

    #[serde(default = "default_phosphorus_high_from")]
    pub phosphorus_high_from: f64,

    #[serde(default = "default_potassium_low_below")]
    pub potassium_low_below: f64,

    #[serde(default = "default_potassium_high_from")]
    pub potassium_high_from: f64,
}

fn default_nitrogen_low_below() -> f64 { 50.0 }
fn default_nitrogen_high_from() -> f64 { 150.0 }
fn default_phosphorus_low_below() -> f64 { 15.0 }
fn default_phosphorus_high_from() -> f64 { 60.0 }
fn default_potassium_low_below() -> f64 { 50.0 }
fn default_potassium_high_from() -> f64 { 200.0 }

impl Default for NutrientConfig {
    fn default() -> Self {
        Self {
            nitrogen_low_below: default_nitrogen_low_below(),
            nitrogen_high_from: default_nitrogen_high_from(),
            phosphorus_low_below: default_phosphorus_low_below(),
            phosphorus_high_from: default_phosphorus_high_from(),
            potassium_low_below: default_potassium_low_below(),
            potassium_high_from: default_potassium_high_from(),
        }
    }
}

impl NutrientConfig {
    pub fn nitrogen_status(&self, value: Option<f64>) -> NutrientStatus {
        classify_status(value, self.nitrogen_low_below, self.nitrogen_high_from)
    }

    pub fn phosphorus_status(&self, value: Option<f64>) -> NutrientStatus {
        classify_status(value, self.phosphorus_low_below, self.phosphorus_high_from)
    }

    pub fn potassium_status(&self, value: Option<f64>) -> NutrientStatus {
        classify_status(value, self.potassium_low_below, self.potassium_high_from)
    }
}

fn classify_status(value: Option<f64>, low_below: f64, high_from: f64) -> NutrientStatus {
    match value {
        None => NutrientStatus::Unknown,
        Some(v) if v < low_below => NutrientStatus::Low,
        Some(v) if v < high_from => NutrientStatus::Adequate,
        Some(_) => NutrientStatus::High,
    }
}

// ============================================================================
// Organic Carbon
// ============================================================================

/// Organic carbon (%) bands for scoring, plus the cutoff below which the
/// rule engine asks for organic matter instead of biofertilizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicCarbonConfig {
    #[serde(default = "default_oc_low_below")]
    pub low_below: f64,

    #[serde(default = "default_oc_medium_below")]
    pub medium_below: f64,

    /// At or above this the soil is "very high" and slightly penalised
    #[serde(default = "default_oc_good_below")]
    pub good_below: f64,

    #[serde(default = "default_oc_rule_cutoff")]
    pub rule_cutoff: f64,
}

fn default_oc_low_below() -> f64 { 0.5 }
fn default_oc_medium_below() -> f64 { 0.75 }
fn default_oc_good_below() -> f64 { 1.5 }
fn default_oc_rule_cutoff() -> f64 { 0.75 }

impl Default for OrganicCarbonConfig {
    fn default() -> Self {
        Self {
            low_below: default_oc_low_below(),
            medium_below: default_oc_medium_below(),
            good_below: default_oc_good_below(),
            rule_cutoff: default_oc_rule_cutoff(),
        }
    }
}

// ============================================================================
// Salinity
// ============================================================================

/// Electrical conductivity (dS/m) bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalinityConfig {
    #[serde(default = "default_non_saline_below")]
    pub non_saline_below: f64,

    #[serde(default = "default_slightly_saline_below")]
    pub slightly_saline_below: f64,
}

fn default_non_saline_below() -> f64 { 0.8 }
fn default_slightly_saline_below() -> f64 { 2.0 }

impl Default for SalinityConfig {
    fn default() -> Self {
        Self {
            non_saline_below: default_non_saline_below(),
            slightly_saline_below: default_slightly_saline_below(),
        }
    }
}

// ============================================================================
// Soil Health Categories
// ============================================================================

/// Inclusive lower bounds of the soil-health categories. Anything under
/// `moderate_from` is Poor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealthConfig {
    #[serde(default = "default_excellent_from")]
    pub excellent_from: f64,

    #[serde(default = "default_good_from")]
    pub good_from: f64,

    #[serde(default = "default_moderate_from")]
    pub moderate_from: f64,
}

fn default_excellent_from() -> f64 { 0.8 }
fn default_good_from() -> f64 { 0.6 }
fn default_moderate_from() -> f64 { 0.4 }

impl Default for SoilHealthConfig {
    fn default() -> Self {
        Self {
            excellent_from: default_excellent_from(),
            good_from: default_good_from(),
            moderate_from: default_moderate_from(),
        }
    }
}

impl SoilHealthConfig {
    pub fn category(&self, index: f64) -> HealthCategory {
        if index >= self.excellent_from {
            HealthCategory::Excellent
        } else if index >= self.good_from {
            HealthCategory::Good
        } else if index >= self.moderate_from {
            HealthCategory::Moderate
        } else {
            HealthCategory::Poor
        }
    }
}

// ============================================================================
// Predictor
// ============================================================================

/// Statistical predictor artifacts. A missing file is a normal condition:
/// the predictor reports itself unavailable and the rules carry on alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_predictor_enabled")]
    pub enabled: bool,

    /// Serialized classifier (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Serialized feature transform (JSON)
    #[serde(default = "default_transform_path")]
    pub transform_path: PathBuf,
}

fn default_predictor_enabled() -> bool { true }
fn default_model_path() -> PathBuf { PathBuf::from(defaults::MODEL_PATH) }
fn default_transform_path() -> PathBuf { PathBuf::from(defaults::TRANSFORM_PATH) }

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            enabled: default_predictor_enabled(),
            model_path: default_model_path(),
            transform_path: default_transform_path(),
        }
    }
}

impl PredictorConfig {
    /// Artifact paths with `SOIL_ADVISOR_MODEL_PATH` /
    /// `SOIL_ADVISOR_TRANSFORM_PATH` applied on top.
    pub fn resolved_paths(&self) -> (PathBuf, PathBuf) {
        let model = std::env::var_os(defaults::MODEL_PATH_ENV_VAR)
            .map_or_else(|| self.model_path.clone(), PathBuf::from);
        let transform = std::env::var_os(defaults::TRANSFORM_PATH_ENV_VAR)
            .map_or_else(|| self.transform_path.clone(), PathBuf::from);
        (model, transform)
    }
}

// ============================================================================
// Tests
// ============================================================================
