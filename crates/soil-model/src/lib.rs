//! # Soil Model Crate
//!
//! Domain types shared by the recommendation engine and its callers.
//!
//! ## Main Components
//!
//! - **types**: `SoilType`, `SoilProfile`, `Suitability`, `Recommendation`
//! - **parser**: Parse line-based profile files for batch evaluation
//! - **error**: Error types for validation and parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use soil_model::{SoilProfile, parser};
//! use std::path::Path;
//!
//! let profile = SoilProfile::new("loam", 70.0, 4.0, 6.5);
//! profile.validate()?;
//!
//! let batch = parser::parse_profiles(Path::new("samples.csv"))?;
//! println!("Loaded {} profiles", batch.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;

pub use error::{Result, SoilModelError};
pub use types::{Recommendation, SoilProfile, SoilType, Suitability};
