//! The recommendation engine.
//!
//! A thin, stateless wrapper around a catalog slice. It holds nothing but a
//! `&'static` reference, so it is `Copy` and can be handed to any number of
//! threads or request handlers without coordination.

use crate::catalog::CatalogVariant;
use crate::ranking::{rank_and_truncate, MAX_RECOMMENDATIONS};
use crate::rule::CropRule;
use serde::Serialize;
use soil_model::{Recommendation, SoilProfile, Suitability};
use tracing::{debug, trace};

/// Outcome of a single rule for a profile, for explaining results.
/// Emitted as JSON by `recommend --explain --json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleEvaluation {
    pub name: &'static str,
    pub matched: bool,
    /// `None` when the rule did not match
    pub suitability: Option<Suitability>,
}

/// Evaluates a crop catalog against soil profiles.
///
/// ## Algorithm
/// 1. Run every rule's predicate in catalog order
/// 2. Classify each match as excellent or good
/// 3. Stable-sort by tier
/// 4. Keep at most `MAX_RECOMMENDATIONS`
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    variant: CatalogVariant,
    rules: &'static [CropRule],
}

impl RecommendationEngine {
    pub fn new(variant: CatalogVariant) -> Self {
        Self {
            variant,
            rules: variant.rules(),
        }
    }

    pub fn variant(&self) -> CatalogVariant {
        self.variant
    }

    pub fn rules(&self) -> &'static [CropRule] {
        self.rules
    }

    /// Top crops for `profile`, best tier first.
    ///
    /// Never fails. Unknown soil types and non-finite measurements simply
    /// match fewer rules, possibly none.
    pub fn recommend(&self, profile: &SoilProfile) -> Vec<Recommendation> {
        let matches: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| rule.recommend(profile))
            .inspect(|rec| trace!(crop = %rec.name, suitability = %rec.suitability, "Crop matched"))
            .collect();

        let matched = matches.len();
        let ranked = rank_and_truncate(matches, MAX_RECOMMENDATIONS);

        debug!(
            soil_type = %profile.soil_type,
            catalog = %self.variant,
            matched,
            returned = ranked.len(),
            "Evaluated crop catalog"
        );
        ranked
    }

    /// Per-rule outcome in catalog order, unranked and untruncated
    pub fn evaluate(&self, profile: &SoilProfile) -> Vec<RuleEvaluation> {
        self.rules
            .iter()
            .map(|rule| {
                let matched = rule.matches(profile);
                RuleEvaluation {
                    name: rule.name,
                    matched,
                    suitability: matched.then(|| rule.classify(profile)),
                }
            })
            .collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(CatalogVariant::default())
    }
}

/// Recommend against the full catalog
pub fn recommend(profile: &SoilProfile) -> Vec<Recommendation> {
    RecommendationEngine::default().recommend(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_uses_extended_catalog() {
        let engine = RecommendationEngine::default();
        assert_eq!(engine.variant(), CatalogVariant::Extended);
        assert_eq!(engine.rules().len(), 12);
    }

    #[test]
    fn test_evaluate_reports_every_rule() {
        let engine = RecommendationEngine::new(CatalogVariant::Basic);
        let profile = SoilProfile::new("clay", 95.0, 0.0, 6.0);
        let evaluations = engine.evaluate(&profile);

        assert_eq!(evaluations.len(), 6);
        let rice = evaluations.iter().find(|e| e.name == "Rice").unwrap();
        assert!(rice.matched);
        assert_eq!(rice.suitability, Some(Suitability::Excellent));

        let corn = evaluations.iter().find(|e| e.name == "Corn (Maize)").unwrap();
        assert!(!corn.matched);
        assert_eq!(corn.suitability, None);
    }

    #[test]
    fn test_evaluate_agrees_with_recommend() {
        let engine = RecommendationEngine::default();
        let profile = SoilProfile::new("sandy", 60.0, 3.5, 6.2);

        let matched: Vec<&str> = engine
            .evaluate(&profile)
            .into_iter()
            .filter(|e| e.matched)
            .map(|e| e.name)
            .collect();
        let recommended = engine.recommend(&profile);

        assert!(recommended.len() <= matched.len());
        for rec in &recommended {
            assert!(matched.contains(&rec.name.as_str()));
        }
    }

    #[test]
    fn test_free_function_matches_default_engine() {
        let profile = SoilProfile::new("loam", 70.0, 4.0, 6.5);
        assert_eq!(recommend(&profile), RecommendationEngine::default().recommend(&profile));
    }

    #[test]
    fn test_evaluation_serializes_for_explain_output() {
        let engine = RecommendationEngine::new(CatalogVariant::Basic);
        let evaluations = engine.evaluate(&SoilProfile::new("silt", 85.0, 0.0, 6.0));
        let json = serde_json::to_value(&evaluations).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 6);
        assert_eq!(
            json[2],
            serde_json::json!({ "name": "Rice", "matched": true, "suitability": "good" })
        );
        assert_eq!(
            json[1],
            serde_json::json!({ "name": "Corn (Maize)", "matched": false, "suitability": null })
        );
    }
}
