//! A single crop rule.
//!
//! Each catalog entry pairs static descriptive text with two pure functions
//! of the profile: one deciding whether the crop is a candidate at all, and
//! one deciding its tier once it is.

use soil_model::{Recommendation, SoilProfile, Suitability};
use std::fmt;

/// Decides whether a crop is a candidate for a profile
pub type Predicate = fn(&SoilProfile) -> bool;

/// Assigns the tier of a crop already known to be a candidate
pub type Classifier = fn(&SoilProfile) -> Suitability;

/// One catalog entry.
///
/// All fields are `'static` and the functions hold no state, so rules live
/// in plain `static` arrays and are shared freely across threads.
#[derive(Clone, Copy)]
pub struct CropRule {
    pub name: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub predicate: Predicate,
    pub suitability: Classifier,
}

impl CropRule {
    pub fn matches(&self, profile: &SoilProfile) -> bool {
        (self.predicate)(profile)
    }

    /// Tier for this crop. Only meaningful when `matches` holds.
    pub fn classify(&self, profile: &SoilProfile) -> Suitability {
        (self.suitability)(profile)
    }

    /// Build the output record if the profile matches this rule
    pub fn recommend(&self, profile: &SoilProfile) -> Option<Recommendation> {
        if !self.matches(profile) {
            return None;
        }
        Some(self.to_recommendation(self.classify(profile)))
    }

    pub fn to_recommendation(&self, suitability: Suitability) -> Recommendation {
        Recommendation {
            name: self.name.to_string(),
            description: self.description.to_string(),
            suitability,
            benefits: self.benefits.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl fmt::Debug for CropRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropRule")
            .field("name", &self.name)
            .field("benefits", &self.benefits)
            .finish_non_exhaustive()
    }
}

// Comparison helpers shared by the catalog. Bounds are inclusive. A NaN or
// infinite measurement fails every comparison, so a missing field can only
// remove matches, never add them.

/// `value >= min`
pub(crate) fn at_least(value: f64, min: f64) -> bool {
    value.is_finite() && value >= min
}

/// `min <= value <= max`
pub(crate) fn within(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && value >= min && value <= max
}
