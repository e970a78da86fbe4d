//! # Assessment Service
//!
//! Coordinates one soil assessment:
//! 1. Convert the request into a `SoilProfile` (missing numbers become NaN)
//! 2. Optionally validate it strictly
//! 3. Run the recommendation engine
//! 4. Stamp the result with an id, owner and creation time
//! 5. Append it to the in-memory log

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use engine::{CatalogVariant, RecommendationEngine};
use soil_model::{SoilProfile, SoilType};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::store::{Assessment, AssessmentLog};

/// Number of records returned by a history query without an explicit limit
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Body of `POST /api/assessments`.
///
/// Numeric fields are optional on the wire. An absent field is evaluated as
/// NaN, which fails every rule comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub soil_type: SoilType,
    pub moisture: Option<f64>,
    pub organic_content: Option<f64>,
    pub ph: Option<f64>,
}

impl AssessmentRequest {
    pub fn to_profile(&self) -> SoilProfile {
        SoilProfile {
            soil_type: self.soil_type.clone(),
            moisture: self.moisture.unwrap_or(f64::NAN),
            organic_content: self.organic_content.unwrap_or(f64::NAN),
            ph: self.ph.unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssessmentService {
    engine: RecommendationEngine,
    log: AssessmentLog,
    strict_validation: bool,
}

impl AssessmentService {
    pub fn new(catalog: CatalogVariant, max_records: usize, strict_validation: bool) -> Self {
        Self {
            engine: RecommendationEngine::new(catalog),
            log: AssessmentLog::new(max_records),
            strict_validation,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.catalog, config.max_records, config.strict_validation)
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Evaluate and record one assessment for `owner_id`
    pub fn create_assessment(
        &self,
        owner_id: &str,
        request: AssessmentRequest,
    ) -> Result<Assessment, ApiError> {
        let start_time = Instant::now();
        let profile = request.to_profile();

        if self.strict_validation {
            if let Err(e) = profile.validate() {
                warn!("Rejected assessment from {}: {}", owner_id, e);
                return Err(e.into());
            }
        }

        let recommendations = self.engine.recommend(&profile);
        if recommendations.is_empty() {
            info!(
                "No crops matched for {} (soil type {})",
                owner_id, profile.soil_type
            );
        }

        let assessment = Assessment {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            soil_type: request.soil_type,
            moisture: request.moisture,
            organic_content: request.organic_content,
            ph: request.ph,
            recommendations,
            created_at: Utc::now(),
        };

        self.log.insert(assessment.clone())?;

        info!(
            "Created assessment {} for {} with {} recommendations in {:.2?}",
            assessment.id,
            owner_id,
            assessment.recommendations.len(),
            start_time.elapsed()
        );
        Ok(assessment)
    }

    /// The owner's most recent assessments, newest first
    pub fn recent_assessments(
        &self,
        owner_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Assessment>, ApiError> {
        self.log
            .recent_for(owner_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
    }
}
