//! Server crate for the SoilRecs recommendation engine.
//!
//! This crate wraps the engine in an HTTP API: it accepts soil
//! measurements, records each assessment in an in-memory log, and serves
//! a caller's recent history.

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod store;

pub use api::create_router;
pub use config::ServerConfig;
pub use error::ApiError;
pub use service::{AssessmentRequest, AssessmentService};
pub use store::{Assessment, AssessmentLog};
