//! Crop recommendation engine.
//!
//! This crate provides:
//! - `CropRule`: a catalog entry pairing a candidate predicate with a tier classifier
//! - The static crop catalog (basic and extended variants)
//! - `RecommendationEngine` for evaluating, ranking and truncating matches
//!
//! ## Architecture
//! Evaluation is a single pure pass:
//! 1. Every rule in the catalog is checked against the profile
//! 2. Matching rules are classified as excellent or good
//! 3. Matches are stable-sorted by tier and cut to the top six
//!
//! ## Example Usage
//! ```ignore
//! use engine::{CatalogVariant, RecommendationEngine};
//! use soil_model::SoilProfile;
//!
//! let engine = RecommendationEngine::new(CatalogVariant::Extended);
//! let profile = SoilProfile::new("loam", 70.0, 4.0, 6.5);
//!
//! for rec in engine.recommend(&profile) {
//!     println!("{} ({})", rec.name, rec.suitability);
//! }
//! ```

pub mod rule;
pub mod catalog;
pub mod ranking;
pub mod recommender;

// Re-export main types
pub use catalog::{CatalogVariant, UnknownCatalog, EXTENDED_CATALOG};
pub use recommender::{recommend, RecommendationEngine, RuleEvaluation};
pub use ranking::{rank_and_truncate, MAX_RECOMMENDATIONS};
pub use rule::CropRule;
