//! Organic-carbon and biological rules.

use super::RuleHit;

/// Organic matter below `cutoff` (or unknown) asks for FYM and
/// vermicompost; otherwise biofertilizer rounds out the programme.
pub fn organic_rules(organic_carbon: Option<f64>, cutoff: f64) -> Vec<RuleHit> {
    match organic_carbon {
        Some(oc) if oc < cutoff => low_carbon_hits(),
        None => low_carbon_hits(),
        // a reading that is not below the cutoff, NaN included
        Some(_) => vec![RuleHit::new(
            "Biofertilizer",
            3,
            "Organic carbon is reasonably good. Biofertilizers (Rhizobium, \
             Azotobacter, PSB, etc.) can complement mineral fertilizers and \
             improve nutrient-use efficiency.",
        )],
    }
}

fn low_carbon_hits() -> Vec<RuleHit> {
    vec![
        RuleHit::new(
            "FYM",
            1,
            "Soil organic carbon is low to medium. Farmyard manure improves \
             soil structure, microbial activity and long-term nutrient buffering.",
        ),
        RuleHit::new(
            "Vermicompost",
            2,
            "Vermicompost adds stable organic matter and slow-release nutrients, \
             enhancing biological activity and root growth.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_or_missing_carbon_asks_for_manure() {
        for oc in [None, Some(0.3), Some(0.749)] {
            let hits = organic_rules(oc, 0.75);
            let names: Vec<_> = hits.iter().map(|h| (h.name, h.priority)).collect();
            assert_eq!(names, vec![("FYM", 1), ("Vermicompost", 2)], "oc = {oc:?}");
        }
    }

    #[test]
    fn test_cutoff_itself_gets_biofertilizer() {
        let hits = organic_rules(Some(0.75), 0.75);
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].name, hits[0].priority), ("Biofertilizer", 3));
    }

    #[test]
    fn test_nan_carbon_is_not_below_cutoff() {
        let hits = organic_rules(Some(f64::NAN), 0.75);
        let names: Vec<_> = hits.iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Biofertilizer"]);
    }
}
