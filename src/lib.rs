//! Soil Advisor: hybrid fertilizer recommendation from soil test values
//!
//! ## Architecture
//!
//! - **Soil Health**: six factor sub-scores averaged into an index and category
//! - **Rules**: NPK/pH classification feeding five agronomic rule groups
//! - **ML Engine**: optional pre-trained classifier behind a feature transform
//! - **Advisor**: arbitrates between the model and the rules and explains why
//! - **Chemistry**: teaching cards for the fertilizers the advisor names

pub mod advisor;
pub mod chemistry;
pub mod config;
pub mod error;
pub mod ml_engine;
pub mod rules;
pub mod soil_health;
pub mod tables;
pub mod types;

pub use config::AdvisorConfig;
pub use error::AdvisorError;

pub use types::{
    FertilizerCandidate, FinalRecommendation, HealthCategory, NpkStatus, NutrientStatus,
    PhBand, PredictorResult, RecommendationReport, RuleEngineResult, SoilHealthResult,
    SoilRecord, SoilType, Source,
};

pub use advisor::{build_final_recommendation, build_recommendation_report};
pub use ml_engine::{FertilizerPredictor, Predictor};
pub use rules::suggest_fertilizers;
pub use soil_health::compute_soil_health;
