//! Core domain types for soil assessments.
//!
//! - `SoilType`: the soil class of a parcel (free-form on the wire)
//! - `SoilProfile`: the four measurements the engine consumes
//! - `Suitability`: ordinal tier attached to each recommendation
//! - `Recommendation`: one crop surfaced to the caller

use crate::error::{Result, SoilModelError};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Soil type
// =============================================================================

/// Soil class of a parcel.
///
/// Six classes are known to the crop catalog. Anything else arriving from a
/// caller is kept verbatim in `Other` so it round-trips unchanged; no crop
/// rule ever matches it.
///
/// Conversion from a string is exact: `"Loam"` or `" loam"` are `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SoilType {
    Clay,
    Sandy,
    Loam,
    Silt,
    Peat,
    Chalky,
    Other(String),
}

impl SoilType {
    /// The six recognised classes, in the order forms usually list them
    pub const KNOWN: [SoilType; 6] = [
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loam,
        SoilType::Silt,
        SoilType::Peat,
        SoilType::Chalky,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sandy => "sandy",
            SoilType::Loam => "loam",
            SoilType::Silt => "silt",
            SoilType::Peat => "peat",
            SoilType::Chalky => "chalky",
            SoilType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SoilType::Other(_))
    }
}

impl From<&str> for SoilType {
    fn from(s: &str) -> Self {
        match s {
            "clay" => SoilType::Clay,
            "sandy" => SoilType::Sandy,
            "loam" => SoilType::Loam,
            "silt" => SoilType::Silt,
            "peat" => SoilType::Peat,
            "chalky" => SoilType::Chalky,
            other => SoilType::Other(other.to_string()),
        }
    }
}

impl From<String> for SoilType {
    fn from(s: String) -> Self {
        match SoilType::from(s.as_str()) {
            SoilType::Other(_) => SoilType::Other(s),
            known => known,
        }
    }
}

impl From<SoilType> for String {
    fn from(soil_type: SoilType) -> Self {
        match soil_type {
            SoilType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Soil profile
// =============================================================================

/// Four measurements describing a parcel.
///
/// Nothing is enforced on construction. The engine compares the numbers as
/// they are; callers wanting to reject nonsense input call [`validate`].
///
/// [`validate`]: SoilProfile::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfile {
    pub soil_type: SoilType,
    /// Percentage, 0-100
    pub moisture: f64,
    /// Percentage, conceptually 0-10
    pub organic_content: f64,
    /// Conceptually 4-10
    pub ph: f64,
}

impl SoilProfile {
    pub const MOISTURE_RANGE: (f64, f64) = (0.0, 100.0);
    pub const ORGANIC_CONTENT_RANGE: (f64, f64) = (0.0, 10.0);
    pub const PH_RANGE: (f64, f64) = (4.0, 10.0);

    pub fn new(
        soil_type: impl Into<SoilType>,
        moisture: f64,
        organic_content: f64,
        ph: f64,
    ) -> Self {
        Self {
            soil_type: soil_type.into(),
            moisture,
            organic_content,
            ph,
        }
    }

    /// Strict check of the measurements against their physical domains.
    ///
    /// Reports the first violation found: unknown soil type, then each
    /// numeric field in declaration order (non-finite before out-of-range).
    pub fn validate(&self) -> Result<()> {
        if !self.soil_type.is_known() {
            return Err(SoilModelError::UnknownSoilType(
                self.soil_type.as_str().to_string(),
            ));
        }

        check_range("moisture", self.moisture, Self::MOISTURE_RANGE)?;
        check_range(
            "organicContent",
            self.organic_content,
            Self::ORGANIC_CONTENT_RANGE,
        )?;
        check_range("ph", self.ph, Self::PH_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() {
        return Err(SoilModelError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(SoilModelError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Output types
// =============================================================================

/// How well a crop fits a profile.
///
/// Declaration order is preference order, so the derived `Ord` sorts
/// `Excellent` first. No catalog rule currently yields `Fair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    Excellent,
    Good,
    Fair,
}

impl Suitability {
    /// Sort key: excellent=0, good=1, fair=2
    pub fn rank(self) -> u8 {
        match self {
            Suitability::Excellent => 0,
            Suitability::Good => 1,
            Suitability::Fair => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Suitability::Excellent => "excellent",
            Suitability::Good => "good",
            Suitability::Fair => "fair",
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One crop recommended for a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
    pub suitability: Suitability,
    pub benefits: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_type_exact_match() {
        assert_eq!(SoilType::from("loam"), SoilType::Loam);
        assert_eq!(SoilType::from("chalky"), SoilType::Chalky);
        assert_eq!(SoilType::from("Loam"), SoilType::Other("Loam".to_string()));
        assert_eq!(SoilType::from(" clay"), SoilType::Other(" clay".to_string()));
    }

    #[test]
    fn test_soil_type_round_trips_unknown_values() {
        let soil: SoilType = String::from("gravel").into();
        assert_eq!(String::from(soil), "gravel");
    }

    #[test]
    fn test_suitability_ordering() {
        assert!(Suitability::Excellent < Suitability::Good);
        assert!(Suitability::Good < Suitability::Fair);
        assert_eq!(Suitability::Fair.rank(), 2);
    }

    #[test]
    fn test_validate_accepts_domain_bounds() {
        SoilProfile::new("peat", 0.0, 0.0, 4.0).validate().unwrap();
        SoilProfile::new("silt", 100.0, 10.0, 10.0).validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let unknown = SoilProfile::new("gravel", 50.0, 3.0, 6.5);
        assert!(matches!(
            unknown.validate(),
            Err(SoilModelError::UnknownSoilType(s)) if s == "gravel"
        ));

        let wet = SoilProfile::new("loam", 120.0, 3.0, 6.5);
        assert!(matches!(
            wet.validate(),
            Err(SoilModelError::OutOfRange { field: "moisture", .. })
        ));

        let missing_ph = SoilProfile::new("loam", 50.0, 3.0, f64::NAN);
        assert!(matches!(
            missing_ph.validate(),
            Err(SoilModelError::NonFinite { field: "ph" })
        ));
    }

    #[test]
    fn test_profile_json_field_names() {
        let profile = SoilProfile::new("loam", 70.0, 4.0, 6.5);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["soilType"], "loam");
        assert_eq!(json["organicContent"], 4.0);

        let back: SoilProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
