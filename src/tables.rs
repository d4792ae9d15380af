//! Read-only agronomy lookup tables.
//!
//! Process-wide constants. Nothing here can be mutated at runtime.

use crate::types::{FertilizerType, NutrientProfile};

// ============================================================================
// Fertilizer nutrient profiles
// ============================================================================

/// Nutrient percentage profile for every fertilizer the rules can name.
///
/// "Biofertilizer" is deliberately absent: it is a microbial product with no
/// meaningful NPK percentage, so its candidates carry an empty profile.
pub const NUTRIENT_PROFILES: &[(&str, NutrientProfile)] = &[
    ("Urea", profile(46.0, 0.0, 0.0, None, FertilizerType::Nitrogenous)),
    ("Ammonium Sulphate", profile(21.0, 0.0, 0.0, Some(24.0), FertilizerType::Nitrogenous)),
    ("DAP", profile(18.0, 46.0, 0.0, None, FertilizerType::Phosphatic)),
    ("SSP", profile(0.0, 16.0, 0.0, Some(12.0), FertilizerType::Phosphatic)),
    ("MOP", profile(0.0, 0.0, 60.0, None, FertilizerType::Potassic)),
    ("NPK_17_17_17", profile(17.0, 17.0, 17.0, None, FertilizerType::NpkComplex)),
    ("NPK_20_20_0", profile(20.0, 20.0, 0.0, None, FertilizerType::NpkComplex)),
    ("FYM", profile(0.5, 0.2, 0.5, None, FertilizerType::OrganicManure)),
    ("Vermicompost", profile(1.5, 0.9, 1.2, None, FertilizerType::OrganicManure)),
];

const fn profile(
    n: f64,
    p: f64,
    k: f64,
    s: Option<f64>,
    fertilizer_type: FertilizerType,
) -> NutrientProfile {
    NutrientProfile { n, p, k, s, fertilizer_type }
}

/// Exact-name lookup into [`NUTRIENT_PROFILES`].
pub fn nutrient_profile(name: &str) -> Option<NutrientProfile> {
    NUTRIENT_PROFILES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, profile)| *profile)
}

/// Fertilizer families shown in explanations.
pub const FERTILIZER_TYPES: [FertilizerType; 6] = [
    FertilizerType::Nitrogenous,
    FertilizerType::Phosphatic,
    FertilizerType::Potassic,
    FertilizerType::NpkComplex,
    FertilizerType::OrganicManure,
    FertilizerType::Biofertilizer,
];

/// Crops the training data and the crop rules were written for.
pub const SUPPORTED_CROPS: [&str; 8] = [
    "Rice",
    "Wheat",
    "Maize",
    "Sugarcane",
    "Cotton",
    "Pulses",
    "Vegetables",
    "Fruits",
];

// ============================================================================
// Crop groups
// ============================================================================

/// Crop family that carries its own fertilizer adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CropGroup {
    /// Flooded, high N-demand cereals
    Cereal,
    /// Nitrogen-fixing pulses
    Legume,
    Vegetable,
    Sugarcane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    /// Keyword appears anywhere in the crop name
    Contains,
    /// Whole crop name equals the keyword
    Exact,
}

#[derive(Debug, Clone, Copy)]
pub struct CropKeyword {
    pub keyword: &'static str,
    pub group: CropGroup,
    pub matching: KeywordMatch,
}

const fn keyword(keyword: &'static str, group: CropGroup, matching: KeywordMatch) -> CropKeyword {
    CropKeyword { keyword, group, matching }
}

/// Keyword-to-group table. Plain substring/equality matching on the
/// lowercased crop name; no stemming or fuzzy matching.
pub const CROP_KEYWORDS: &[CropKeyword] = &[
    keyword("rice", CropGroup::Cereal, KeywordMatch::Contains),
    keyword("pulse", CropGroup::Legume, KeywordMatch::Contains),
    keyword("gram", CropGroup::Legume, KeywordMatch::Contains),
    keyword("lentil", CropGroup::Legume, KeywordMatch::Contains),
    keyword("pea", CropGroup::Legume, KeywordMatch::Contains),
    keyword("vegetable", CropGroup::Vegetable, KeywordMatch::Contains),
    keyword("tomato", CropGroup::Vegetable, KeywordMatch::Exact),
    keyword("potato", CropGroup::Vegetable, KeywordMatch::Exact),
    keyword("chilli", CropGroup::Vegetable, KeywordMatch::Exact),
    keyword("brinjal", CropGroup::Vegetable, KeywordMatch::Exact),
    keyword("sugarcane", CropGroup::Sugarcane, KeywordMatch::Contains),
];

/// All groups a crop name belongs to, in group order, without duplicates.
pub fn crop_groups(crop: &str) -> Vec<CropGroup> {
    let crop = crop.trim().to_lowercase();
    let mut groups: Vec<CropGroup> = CROP_KEYWORDS
        .iter()
        .filter(|entry| match entry.matching {
            KeywordMatch::Contains => crop.contains(entry.keyword),
            KeywordMatch::Exact => crop == entry.keyword,
        })
        .map(|entry| entry.group)
        .collect();
    groups.sort();
    groups.dedup();
    groups
}
