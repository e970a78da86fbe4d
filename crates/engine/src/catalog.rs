//! The crop catalog.
//!
//! Twelve rules in a fixed declaration order. The order is part of the
//! contract: crops sharing a tier are returned in this order. The basic
//! catalog is the first six entries of the extended one.

use crate::rule::{at_least, within, CropRule};
use serde::{Deserialize, Serialize};
use soil_model::{SoilProfile, SoilType, Suitability};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which slice of the catalog an engine evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVariant {
    /// Wheat through Barley
    Basic,
    /// All twelve crops
    #[default]
    Extended,
}

impl CatalogVariant {
    pub fn rules(self) -> &'static [CropRule] {
        match self {
            CatalogVariant::Basic => &EXTENDED_CATALOG[..BASIC_LEN],
            CatalogVariant::Extended => &EXTENDED_CATALOG,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogVariant::Basic => "basic",
            CatalogVariant::Extended => "extended",
        }
    }
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown catalog {0:?}, expected \"basic\" or \"extended\"")]
pub struct UnknownCatalog(pub String);

impl FromStr for CatalogVariant {
    type Err = UnknownCatalog;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(CatalogVariant::Basic),
            "extended" => Ok(CatalogVariant::Extended),
            _ => Err(UnknownCatalog(s.to_string())),
        }
    }
}

const BASIC_LEN: usize = 6;

/// Every crop rule, in declaration order
pub static EXTENDED_CATALOG: [CropRule; 12] = [
    CropRule {
        name: "Wheat",
        description: "A staple grain crop ideal for your soil conditions. Thrives in moderate climates with adequate moisture.",
        benefits: &[
            "High market value",
            "Multiple varieties available",
            "Good rotation crop",
            "Drought tolerant once established",
        ],
        predicate: wheat_fits,
        suitability: wheat_tier,
    },
    CropRule {
        name: "Corn (Maize)",
        description: "High-yielding crop perfect for nutrient-rich soils. Requires consistent moisture throughout growing season.",
        benefits: &[
            "High yield potential",
            "Multiple uses (grain, silage, fresh)",
            "Good for organic matter retention",
            "Excellent rotation crop",
        ],
        predicate: corn_fits,
        suitability: corn_tier,
    },
    CropRule {
        name: "Rice",
        description: "Excellent for waterlogged conditions and clay soils. Requires flooded fields or very high moisture.",
        benefits: &[
            "Thrives in wet conditions",
            "High caloric yield per acre",
            "Improves soil structure",
            "Stable market demand",
        ],
        predicate: rice_fits,
        suitability: rice_tier,
    },
    CropRule {
        name: "Potatoes",
        description: "Root vegetable that performs well in slightly acidic, well-drained soils with good organic content.",
        benefits: &[
            "High yield per acre",
            "Short growing season",
            "Multiple harvests possible",
            "Good storage crop",
        ],
        predicate: potatoes_fit,
        suitability: potatoes_tier,
    },
    CropRule {
        name: "Soybeans",
        description: "Legume crop that enriches soil with nitrogen. Excellent for crop rotation and soil health.",
        benefits: &[
            "Fixes nitrogen in soil",
            "High protein content",
            "Good market value",
            "Improves soil for next crop",
        ],
        predicate: soybeans_fit,
        suitability: soybeans_tier,
    },
    CropRule {
        name: "Barley",
        description: "Hardy grain crop tolerant of various conditions. Good for alkaline soils and lower moisture.",
        benefits: &[
            "Drought tolerant",
            "Short growing season",
            "Multiple uses (feed, malt, food)",
            "Tolerates alkaline soils",
        ],
        predicate: barley_fits,
        suitability: barley_tier,
    },
    CropRule {
        name: "Cotton",
        description: "Fiber crop requiring warm conditions and well-drained soil. Good economic returns in suitable climates.",
        benefits: &[
            "High economic value",
            "Long growing season",
            "Multiple products (fiber, seed oil)",
            "Deep root system improves soil",
        ],
        predicate: cotton_fits,
        suitability: cotton_tier,
    },
    CropRule {
        name: "Carrots",
        description: "Root vegetable that excels in loose, well-drained soils. Requires consistent moisture for straight roots.",
        benefits: &[
            "High nutritional value",
            "Good market demand",
            "Multiple varieties",
            "Can be succession planted",
        ],
        predicate: carrots_fit,
        suitability: carrots_tier,
    },
    CropRule {
        name: "Lettuce",
        description: "Quick-growing leafy green ideal for rich, moist soils. Perfect for short-season production.",
        benefits: &[
            "Fast harvest cycle",
            "High value per acre",
            "Multiple harvests possible",
            "Low maintenance",
        ],
        predicate: lettuce_fits,
        suitability: lettuce_tier,
    },
    CropRule {
        name: "Sunflowers",
        description: "Versatile crop tolerant of various conditions. Produces oil seeds and improves soil structure.",
        benefits: &[
            "Drought tolerant",
            "Deep roots break up soil",
            "Oil seed production",
            "Attracts beneficial insects",
        ],
        predicate: sunflowers_fit,
        suitability: sunflowers_tier,
    },
    CropRule {
        name: "Tomatoes",
        description: "High-value crop requiring nutrient-rich soil and consistent care. Excellent market returns.",
        benefits: &[
            "High market value",
            "Multiple varieties",
            "Long harvest season",
            "Fresh market and processing options",
        ],
        predicate: tomatoes_fit,
        suitability: tomatoes_tier,
    },
    CropRule {
        name: "Alfalfa",
        description: "Perennial legume excellent for forage and soil improvement. Fixes nitrogen and has deep roots.",
        benefits: &[
            "Fixes nitrogen",
            "Multiple cuttings per year",
            "Improves soil structure",
            "High protein forage",
        ],
        predicate: alfalfa_fits,
        suitability: alfalfa_tier,
    },
];

fn tier(excellent: bool) -> Suitability {
    if excellent {
        Suitability::Excellent
    } else {
        Suitability::Good
    }
}

// =============================================================================
// Grains
// =============================================================================

fn wheat_fits(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Loam | SoilType::Clay)
        && within(p.ph, 6.0, 7.5)
        && at_least(p.moisture, 40.0)
}

fn wheat_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.moisture, 60.0) && at_least(p.organic_content, 2.5))
}

fn corn_fits(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Loam | SoilType::Silt)
        && at_least(p.moisture, 60.0)
        && at_least(p.organic_content, 3.0)
        && within(p.ph, 5.5, 7.0)
}

fn corn_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 4.0) && at_least(p.moisture, 70.0))
}

fn rice_fits(p: &SoilProfile) -> bool {
    at_least(p.moisture, 80.0)
        && matches!(p.soil_type, SoilType::Clay | SoilType::Silt)
        && within(p.ph, 5.5, 7.0)
}

fn rice_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.moisture, 90.0) && p.soil_type == SoilType::Clay)
}

fn barley_fits(p: &SoilProfile) -> bool {
    within(p.ph, 6.5, 8.0)
        && at_least(p.moisture, 35.0)
        && matches!(
            p.soil_type,
            SoilType::Loam | SoilType::Clay | SoilType::Chalky
        )
}

fn barley_tier(p: &SoilProfile) -> Suitability {
    tier(p.soil_type == SoilType::Loam && at_least(p.ph, 7.0))
}

// =============================================================================
// Legumes and forage
// =============================================================================

fn soybeans_fit(p: &SoilProfile) -> bool {
    matches!(
        p.soil_type,
        SoilType::Loam | SoilType::Silt | SoilType::Clay
    ) && within(p.ph, 6.0, 7.0)
        && at_least(p.moisture, 50.0)
}

fn soybeans_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 2.5) && at_least(p.moisture, 60.0))
}

fn alfalfa_fits(p: &SoilProfile) -> bool {
    within(p.ph, 6.5, 7.5)
        && matches!(p.soil_type, SoilType::Loam | SoilType::Clay)
        && at_least(p.moisture, 40.0)
}

fn alfalfa_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 2.5) && at_least(p.ph, 7.0))
}

// =============================================================================
// Vegetables
// =============================================================================

fn potatoes_fit(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Sandy | SoilType::Loam)
        && at_least(p.moisture, 50.0)
        && within(p.ph, 5.0, 6.5)
        && at_least(p.organic_content, 2.0)
}

fn potatoes_tier(p: &SoilProfile) -> Suitability {
    tier(p.soil_type == SoilType::Loam && at_least(p.organic_content, 3.0))
}

fn carrots_fit(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Sandy | SoilType::Loam)
        && at_least(p.moisture, 45.0)
        && within(p.ph, 5.5, 7.0)
        && at_least(p.organic_content, 2.5)
}

fn carrots_tier(p: &SoilProfile) -> Suitability {
    tier(p.soil_type == SoilType::Sandy && at_least(p.organic_content, 3.0))
}

fn lettuce_fits(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Loam | SoilType::Silt)
        && at_least(p.moisture, 60.0)
        && within(p.ph, 6.0, 7.0)
        && at_least(p.organic_content, 3.0)
}

fn lettuce_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 4.0) && at_least(p.moisture, 70.0))
}

fn tomatoes_fit(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Loam | SoilType::Sandy)
        && at_least(p.moisture, 55.0)
        && within(p.ph, 6.0, 7.0)
        && at_least(p.organic_content, 3.0)
}

fn tomatoes_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 4.0) && at_least(p.moisture, 65.0))
}

// =============================================================================
// Industrial and oil crops
// =============================================================================

fn cotton_fits(p: &SoilProfile) -> bool {
    matches!(p.soil_type, SoilType::Sandy | SoilType::Loam)
        && at_least(p.moisture, 45.0)
        && within(p.ph, 5.5, 7.5)
        && at_least(p.organic_content, 2.0)
}

fn cotton_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.moisture, 55.0) && at_least(p.organic_content, 3.0))
}

fn sunflowers_fit(p: &SoilProfile) -> bool {
    at_least(p.moisture, 30.0)
        && within(p.ph, 6.0, 7.5)
        && matches!(
            p.soil_type,
            SoilType::Loam | SoilType::Sandy | SoilType::Clay
        )
}

fn sunflowers_tier(p: &SoilProfile) -> Suitability {
    tier(at_least(p.organic_content, 2.0) && at_least(p.moisture, 40.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static CropRule {
        EXTENDED_CATALOG
            .iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<&str> = EXTENDED_CATALOG.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "Wheat",
                "Corn (Maize)",
                "Rice",
                "Potatoes",
                "Soybeans",
                "Barley",
                "Cotton",
                "Carrots",
                "Lettuce",
                "Sunflowers",
                "Tomatoes",
                "Alfalfa",
            ]
        );
    }

    #[test]
    fn test_basic_catalog_is_prefix() {
        let basic = CatalogVariant::Basic.rules();
        assert_eq!(basic.len(), 6);
        assert_eq!(basic.last().unwrap().name, "Barley");
        assert_eq!(CatalogVariant::Extended.rules().len(), 12);
    }

    #[test]
    fn test_every_rule_has_four_benefits() {
        for rule in EXTENDED_CATALOG.iter() {
            assert_eq!(rule.benefits.len(), 4, "{}", rule.name);
            assert!(!rule.description.is_empty());
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("basic".parse::<CatalogVariant>(), Ok(CatalogVariant::Basic));
        assert_eq!(" Extended ".parse::<CatalogVariant>(), Ok(CatalogVariant::Extended));
        assert!("full".parse::<CatalogVariant>().is_err());
    }

    #[test]
    fn test_potatoes_ph_window() {
        let potatoes = rule("Potatoes");
        assert!(potatoes.matches(&SoilProfile::new("sandy", 50.0, 2.0, 5.0)));
        assert!(potatoes.matches(&SoilProfile::new("sandy", 50.0, 2.0, 6.5)));
        assert!(!potatoes.matches(&SoilProfile::new("sandy", 50.0, 2.0, 6.51)));
        assert!(!potatoes.matches(&SoilProfile::new("sandy", 50.0, 2.0, 4.99)));
    }

    #[test]
    fn test_barley_accepts_chalky() {
        let barley = rule("Barley");
        let chalky = SoilProfile::new("chalky", 35.0, 0.0, 8.0);
        assert!(barley.matches(&chalky));
        assert_eq!(barley.classify(&chalky), Suitability::Good);

        let loam = SoilProfile::new("loam", 35.0, 0.0, 7.0);
        assert_eq!(barley.classify(&loam), Suitability::Excellent);
    }

    #[test]
    fn test_carrots_excellent_only_on_sandy() {
        let carrots = rule("Carrots");
        let sandy = SoilProfile::new("sandy", 45.0, 3.0, 6.0);
        let loam = SoilProfile::new("loam", 45.0, 3.0, 6.0);

        assert!(carrots.matches(&sandy) && carrots.matches(&loam));
        assert_eq!(carrots.classify(&sandy), Suitability::Excellent);
        assert_eq!(carrots.classify(&loam), Suitability::Good);
    }

    #[test]
    fn test_alfalfa_excellent_needs_neutral_ph() {
        let alfalfa = rule("Alfalfa");
        let acidic = SoilProfile::new("clay", 40.0, 2.5, 6.5);
        let neutral = SoilProfile::new("clay", 40.0, 2.5, 7.0);

        assert_eq!(alfalfa.classify(&acidic), Suitability::Good);
        assert_eq!(alfalfa.classify(&neutral), Suitability::Excellent);
    }

    #[test]
    fn test_sunflowers_low_moisture_floor() {
        let sunflowers = rule("Sunflowers");
        assert!(sunflowers.matches(&SoilProfile::new("sandy", 30.0, 0.0, 6.0)));
        assert!(!sunflowers.matches(&SoilProfile::new("sandy", 29.9, 0.0, 6.0)));
        assert!(!sunflowers.matches(&SoilProfile::new("silt", 50.0, 0.0, 6.0)));
    }

    #[test]
    fn test_no_rule_yields_fair() {
        let soils = ["clay", "sandy", "loam", "silt", "peat", "chalky"];
        for soil in soils {
            for moisture in [0.0, 35.0, 45.0, 55.0, 65.0, 75.0, 85.0, 95.0] {
                for organic in [0.0, 2.0, 2.5, 3.0, 4.0, 6.0] {
                    for ph in [5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0] {
                        let p = SoilProfile::new(soil, moisture, organic, ph);
                        for rule in EXTENDED_CATALOG.iter().filter(|r| r.matches(&p)) {
                            assert_ne!(rule.classify(&p), Suitability::Fair);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_peat_matches_nothing() {
        for moisture in [0.0, 50.0, 100.0] {
            for ph in [4.0, 6.5, 10.0] {
                let p = SoilProfile::new("peat", moisture, 10.0, ph);
                assert!(EXTENDED_CATALOG.iter().all(|r| !r.matches(&p)));
            }
        }
    }
}
