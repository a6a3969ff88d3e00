//! # API Shared
//!
//! Shared wire types and utilities for the triage APIs.
//!
//! Contains:
//! - Request/response DTOs with OpenAPI schemas (`AssessReq`, `AssessRes`, `HealthRes`)
//! - Boundary validation that turns an `AssessReq` into an engine input
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; the engine itself lives in `triage-core`.

pub mod dto;
pub mod health;

pub use dto::{AssessReq, AssessRes, ErrorRes, HealthRes, LikelyConditionRes, ValidationError};
pub use health::HealthService;
