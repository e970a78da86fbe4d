//! In-memory assessment log.
//!
//! Holds the most recent assessments for the lifetime of the process. Nothing
//! is written to disk; once `max_records` is reached the oldest record is
//! dropped for each new one.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use soil_model::{Recommendation, SoilType};
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use uuid::Uuid;

/// A stored assessment: the input as received plus the engine's answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: Uuid,
    pub owner_id: String,
    pub soil_type: SoilType,
    pub moisture: Option<f64>,
    pub organic_content: Option<f64>,
    pub ph: Option<f64>,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AssessmentLog {
    records: Arc<RwLock<VecDeque<Assessment>>>,
    max_records: usize,
}

impl AssessmentLog {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            max_records,
        }
    }

    pub fn insert(&self, assessment: Assessment) -> Result<(), ApiError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ApiError::Internal("assessment log lock poisoned".to_string()))?;

        while records.len() >= self.max_records.max(1) {
            if let Some(evicted) = records.pop_front() {
                debug!("Evicted assessment {} from log", evicted.id);
            }
        }
        records.push_back(assessment);
        Ok(())
    }

    /// Up to `limit` of `owner_id`'s assessments, newest first.
    ///
    /// Records with identical timestamps come back in reverse insertion order.
    pub fn recent_for(&self, owner_id: &str, limit: usize) -> Result<Vec<Assessment>, ApiError> {
        let records = self
            .records
            .read()
            .map_err(|_| ApiError::Internal("assessment log lock poisoned".to_string()))?;

        let mut owned: Vec<(usize, &Assessment)> = records
            .iter()
            .enumerate()
            .filter(|(_, a)| a.owner_id == owner_id)
            .collect();

        owned.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));

        Ok(owned
            .into_iter()
            .take(limit)
            .map(|(_, a)| a.clone())
            .collect())
    }

    /// Number of stored records. A poisoned lock still reports the true count.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
