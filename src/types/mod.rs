//! Shared data structures for the fertilizer recommendation core
//!
//! - `SoilRecord`: the single soil test + crop supplied by the caller
//! - Status labels: `NutrientStatus`, `PhBand`, `HealthCategory`, `Source`
//! - Results: `SoilHealthResult`, `RuleEngineResult`, `PredictorResult`,
//!   `FinalRecommendation`, and the `RecommendationReport` bundling them

mod soil;
mod status;
mod recommendation;

pub use soil::*;
pub use status::*;
pub use recommendation::*;
