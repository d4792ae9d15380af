//! Fertilizer chemistry explainer.
//!
//! Static teaching content shown next to a recommendation: one chemistry
//! card per common fertilizer, topic sections on nutrient chemistry, and a
//! handful of viva-style quiz items.

use serde::Serialize;

use crate::tables::NUTRIENT_PROFILES;

/// Chemistry card for one fertilizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerChemistry {
    pub name: String,
    #[serde(rename = "type")]
    pub fertilizer_type: String,
    pub formula: String,
    pub main_nutrient_form: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopicSection {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub bullets: &'static [&'static str],
    pub details: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizItem {
    pub question: &'static str,
    pub answer: &'static str,
}

struct ChemCard {
    key: &'static str,
    name: &'static str,
    fertilizer_type: &'static str,
    formula: &'static str,
    main_nutrient_form: &'static str,
    key_points: &'static [&'static str],
}

impl ChemCard {
    fn to_owned_card(&self) -> FertilizerChemistry {
        FertilizerChemistry {
            name: self.name.to_string(),
            fertilizer_type: self.fertilizer_type.to_string(),
            formula: self.formula.to_string(),
            main_nutrient_form: self.main_nutrient_form.to_string(),
            key_points: self.key_points.iter().map(|p| p.to_string()).collect(),
        }
    }
}

// ============================================================================
// Fertilizer cards
// ============================================================================

/// Searched in this order; the first key that matches wins.
const CHEM_CARDS: &[ChemCard] = &[
    ChemCard {
        key: "Urea",
        name: "Urea",
        fertilizer_type: "Nitrogenous",
        formula: "CO(NH₂)₂",
        main_nutrient_form: "Converts to NH₄⁺ → NO₃⁻ in soil",
        key_points: &[
            "Highly concentrated N source (about 46% N).",
            "Hydrolysed by urease to ammonium carbonate, then to ammonium and nitrate.",
            "Surface application on hot, dry soil can cause NH₃ volatilisation.",
            "Best applied in split doses and incorporated into soil or irrigation water.",
        ],
    },
    ChemCard {
        key: "DAP",
        name: "DAP (Diammonium phosphate)",
        fertilizer_type: "Nitrogenous + Phosphatic",
        formula: "(NH₄)₂HPO₄",
        main_nutrient_form: "Provides NH₄⁺ and orthophosphate (HPO₄²⁻ / H₂PO₄⁻)",
        key_points: &[
            "Supplies both N and P (commonly 18-46-0).",
            "Good as a starter fertilizer for many crops.",
            "Can locally raise pH near granule; take care in very acid soils.",
        ],
    },
    ChemCard {
        key: "SSP",
        name: "SSP (Single superphosphate)",
        fertilizer_type: "Phosphatic",
        formula: "Ca(H₂PO₄)₂ + CaSO₄",
        main_nutrient_form: "Provides soluble phosphate plus Ca²⁺ and SO₄²⁻",
        key_points: &[
            "Supplies P along with calcium and sulphur.",
            "Slightly acidifying, useful in many neutral to alkaline soils.",
            "Often used in basal doses where S is also needed.",
        ],
    },
    ChemCard {
        key: "MOP",
        name: "MOP (Muriate of potash)",
        fertilizer_type: "Potassic",
        formula: "KCl",
        main_nutrient_form: "Provides K⁺ ions",
        key_points: &[
            "Most common K fertilizer (about 60% K₂O equivalent).",
            "Improves stress tolerance, water use and quality of produce.",
            "Contains chloride; sensitive crops/soils may require careful use.",
        ],
    },
    ChemCard {
        key: "NPK_17_17_17",
        name: "NPK 17-17-17",
        fertilizer_type: "NPK complex",
        formula: "Mixed complex fertilizer",
        main_nutrient_form: "Balanced supply of N, P₂O₅ and K₂O",
        key_points: &[
            "Each granule contains N, P and K in fixed ratio (17:17:17).",
            "Useful for balanced nutrition in high-value crops like vegetables.",
            "Less flexible than separate N, P, K sources for fine-tuning.",
        ],
    },
    ChemCard {
        key: "FYM",
        name: "FYM (Farmyard manure)",
        fertilizer_type: "Organic manure",
        formula: "Mixture of decomposed dung, urine and bedding",
        main_nutrient_form: "Slow-release N, P, K in organic forms",
        key_points: &[
            "Low nutrient concentration but large benefits to soil structure.",
            "Increases organic carbon, CEC and microbial activity.",
            "Used regularly to maintain long-term soil health.",
        ],
    },
    ChemCard {
        key: "Vermicompost",
        name: "Vermicompost",
        fertilizer_type: "Organic manure",
        formula: "Earthworm-processed organic matter",
        main_nutrient_form: "Humus-rich material with moderate NPK",
        key_points: &[
            "Produced by earthworms from organic residues.",
            "Improves root growth and seedling vigour.",
            "Often used in nurseries and high-value crops.",
        ],
    },
];

/// Chemistry card for a fertilizer name.
///
/// Matching is case-insensitive. A card also matches when either name
/// contains the other, so "urea granules" and "npk" both resolve. Names that
/// only exist in the nutrient-profile table get a minimal card built from
/// their N/P/K percentages. Returns `None` for an empty or unknown name.
pub fn fertilizer_chemistry(name: &str) -> Option<FertilizerChemistry> {
    if name.is_empty() {
        return None;
    }
    let lower = name.to_lowercase();

    if let Some(card) = CHEM_CARDS.iter().find(|card| {
        let key = card.key.to_lowercase();
        lower == key || key.contains(&lower) || lower.contains(&key)
    }) {
        return Some(card.to_owned_card());
    }

    NUTRIENT_PROFILES
        .iter()
        .find(|(key, _)| key.to_lowercase() == lower)
        .map(|(key, profile)| FertilizerChemistry {
            name: key.to_string(),
            fertilizer_type: profile.fertilizer_type.to_string(),
            formula: "NPK fertilizer".to_string(),
            main_nutrient_form: "See N, P, K percentages".to_string(),
            key_points: vec![
                format!(
                    "N: {:.1}%, P₂O₅: {:.1}%, K₂O: {:.1}%.",
                    profile.n, profile.p, profile.k
                ),
                "Complex fertilizer used for balanced NPK supply.".to_string(),
            ],
        })
}

// ============================================================================
// Topic sections
// ============================================================================

const TOPICS: &[TopicSection] = &[
    TopicSection {
        id: "nitrogenous",
        title: "Nitrogenous fertilizers",
        subtitle: "Sources of plant-available nitrogen (NH₄⁺ / NO₃⁻)",
        bullets: &[
            "Urea, ammonium sulphate and related products supply N.",
            "Urea hydrolyses to ammonium, which then nitrifies to nitrate.",
            "Excess N can cause lodging, soft growth and environmental pollution.",
        ],
        details: "Nitrogenous fertilizers primarily provide nitrogen in forms that plants can \
                  take up: ammonium (NH₄⁺) and nitrate (NO₃⁻). Urea [CO(NH₂)₂] is highly \
                  concentrated (46% N). In soil, it is hydrolysed by the enzyme urease to \
                  ammonium carbonate, which then converts to ammonium and nitrate. Ammonium \
                  sulphate [(NH₄)₂SO₄] supplies both N and sulphur, and has an acid-forming effect \
                  on soil. Proper timing, splitting doses and avoiding surface application on \
                  hot, dry soil help reduce volatilisation losses.",
    },
    TopicSection {
        id: "phosphatic",
        title: "Phosphatic fertilizers",
        subtitle: "Supplying phosphorus for roots and energy transfer",
        bullets: &[
            "DAP and SSP supply phosphorus as orthophosphate ions.",
            "P is key for root growth, early vigour and energy (ATP/ADP).",
            "Soil pH strongly affects P availability and fixation.",
        ],
        details: "Phosphatic fertilizers supply P mainly in orthophosphate forms (H₂PO₄⁻, HPO₄²⁻). \
                  Diammonium phosphate (DAP) provides both N and P, whereas single superphosphate \
                  (SSP) provides P plus calcium and sulphur. P is relatively immobile in soil \
                  and tends to get fixed with Fe/Al in acidic soils and with Ca in alkaline soils. \
                  Band placement and correct pH management improve P use efficiency.",
    },
    TopicSection {
        id: "potassic",
        title: "Potassic fertilizers",
        subtitle: "K⁺ for osmotic balance, stress tolerance and quality",
        bullets: &[
            "MOP (KCl) is the most common K fertilizer.",
            "K regulates stomata, water use and stress resistance.",
            "Balanced K improves yield quality and disease resistance.",
        ],
        details: "Potassic fertilizers mainly provide potassium as K⁺. Muriate of potash (MOP, KCl) \
                  contains about 60% K₂O equivalent. Potassium plays a central role in stomatal \
                  regulation, enzyme activation, and osmotic adjustment. Adequate K improves \
                  drought tolerance, disease resistance and quality parameters such as grain \
                  filling and sugar content.",
    },
    TopicSection {
        id: "organics",
        title: "Organic manures & composts",
        subtitle: "Building soil organic matter and buffering capacity",
        bullets: &[
            "FYM and vermicompost supply nutrients slowly over time.",
            "Organic matter improves soil structure and CEC.",
            "Combining organics with mineral fertilizers is ideal.",
        ],
        details: "Organic manures such as farmyard manure (FYM) and vermicompost supply nutrients \
                  in slow-release forms, increase organic carbon and support beneficial soil life. \
                  They improve soil structure, porosity and water holding capacity, while raising \
                  the cation exchange capacity (CEC). Using organics along with chemical \
                  fertilizers buffers pH changes and leads to more sustainable fertility management.",
    },
    TopicSection {
        id: "biofertilizers",
        title: "Biofertilizers",
        subtitle: "Using beneficial microbes to unlock soil nutrients",
        bullets: &[
            "Rhizobium, Azotobacter, Azospirillum – biological N fixation.",
            "PSB – phosphate solubilising bacteria.",
            "Reduce dependence on high N/P chemical doses.",
        ],
        details: "Biofertilizers are live microbial preparations that enhance the availability of \
                  nutrients. Rhizobium forms nodules on legumes and fixes atmospheric nitrogen, \
                  while free-living bacteria like Azotobacter and Azospirillum can fix N in the \
                  rhizosphere. Phosphate solubilising bacteria (PSB) release organic acids that \
                  solubilise fixed soil phosphorus. These reduce the need for heavy N and P inputs \
                  and support sustainable nutrient cycling.",
    },
    TopicSection {
        id: "ph_and_availability",
        title: "Soil pH & nutrient availability",
        subtitle: "Why pH matters for fertilizer efficiency",
        bullets: &[
            "Extreme acidity or alkalinity reduces availability of key nutrients.",
            "P is fixed by Fe/Al at low pH and by Ca at high pH.",
            "Micronutrient solubility changes strongly with pH.",
        ],
        details: "Soil pH controls the chemical forms and solubility of many nutrients. Under acidic \
                  conditions, Al and Mn can become toxic and P may get fixed with Fe/Al oxides. In \
                  alkaline soils, micronutrients such as Fe, Zn and Mn become less available, and P \
                  can precipitate with Ca. Managing pH with amendments (lime, gypsum) and using \
                  appropriate fertilizer types greatly improves nutrient use efficiency.",
    },
    TopicSection {
        id: "soil_health",
        title: "Soil health & NPK balance",
        subtitle: "Going beyond single nutrients to long-term fertility",
        bullets: &[
            "Soil health includes pH, organic matter, NPK and biological activity.",
            "Overuse of one nutrient can disturb the balance and environment.",
            "Combining soil testing with balanced fertilization is essential.",
        ],
        details: "Soil health is a holistic concept that includes chemical (pH, nutrients), physical \
                  (structure, porosity) and biological (microbes, fauna) components. Imbalanced \
                  application of NPK may give short-term yield but harm long-term health through \
                  acidification, salinity or nutrient mining. Regenerating soil organic matter and \
                  applying fertilizers as per soil test are key to sustainable productivity.",
    },
];

pub fn topic_sections() -> &'static [TopicSection] {
    TOPICS
}

pub fn topic(id: &str) -> Option<&'static TopicSection> {
    TOPICS.iter().find(|t| t.id == id)
}

// ============================================================================
// Quiz
// ============================================================================

const QUIZ: &[QuizItem] = &[
    QuizItem {
        question: "Why can urea cause nitrogen loss if left on the soil surface in hot, dry conditions?",
        answer: "Because during hydrolysis, carbonate and ammonium can form free ammonia gas (NH₃), \
                 which volatilises to the atmosphere if not incorporated into the soil or followed by irrigation.",
    },
    QuizItem {
        question: "What is the advantage of SSP over DAP in sulphur-deficient soils?",
        answer: "SSP supplies phosphorus along with calcium and sulphur, making it useful where crops \
                 also need sulphur, whereas DAP does not supply S.",
    },
    QuizItem {
        question: "How does soil pH influence phosphorus availability?",
        answer: "At low pH, P can be fixed by iron and aluminium oxides; at high pH, it can precipitate \
                 with calcium. Maximum availability typically occurs around mildly acidic to neutral pH.",
    },
    QuizItem {
        question: "Why is potassium important for drought resistance?",
        answer: "K⁺ helps regulate stomatal opening and closing, improves osmotic adjustment and water-use efficiency, \
                 allowing plants to better tolerate water stress.",
    },
    QuizItem {
        question: "What is the main role of biofertilizers in fertilizer management?",
        answer: "They use beneficial microbes to fix nitrogen or solubilise phosphorus, thereby increasing \
                 nutrient availability and reducing the need for high chemical fertilizer doses.",
    },
];

pub fn quiz_items() -> &'static [QuizItem] {
    QUIZ
}
