use crate::HealthRes;

/// Simple health service shared by the REST API and any future transport.
///
/// The engine is loaded before any server starts, so a process that can answer
/// this check already has a valid rule set.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "ok".into(),
        }
    }
}
