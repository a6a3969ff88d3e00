//! Wire types for the triage REST boundary.
//!
//! Responsibilities:
//! - Define the JSON request/response shapes and their OpenAPI schemas
//! - Validate requests at the boundary before they reach the engine
//! - Translate engine results into wire responses

use serde::{Deserialize, Serialize};
use triage_core::constants::MAX_AGE_YEARS;
use triage_core::{AssessmentInput, AssessmentResult, LikelyCondition};
use utoipa::ToSchema;

/// Errors raised while validating an assessment request.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("age must be between 0 and {max}, got {age}")]
    AgeOutOfRange { age: u32, max: u32 },
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
}

/// Error body returned for rejected requests.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Symptom assessment request.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AssessReq {
    /// Age in years (0-120).
    pub age: u32,
    /// male/female/other. Accepted but not used for scoring.
    #[serde(default)]
    pub sex: Option<String>,
    /// List of symptom strings.
    pub symptoms: Vec<String>,
    /// Duration of symptoms in days.
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Extra free-text information.
    #[serde(default)]
    pub notes: Option<String>,
}

impl AssessReq {
    /// Validates the request and converts it into an engine input.
    ///
    /// Absent notes become an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AgeOutOfRange`] if `age` exceeds 120. Negative values and
    /// missing required fields are rejected earlier, during JSON deserialisation.
    pub fn validate(self) -> Result<AssessmentInput, ValidationError> {
        if self.age > MAX_AGE_YEARS {
            return Err(ValidationError::AgeOutOfRange {
                age: self.age,
                max: MAX_AGE_YEARS,
            });
        }

        Ok(AssessmentInput {
            age: self.age,
            sex: self.sex,
            symptoms: self.symptoms,
            duration_days: self.duration_days,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LikelyConditionRes {
    pub condition: String,
    pub score: f64,
}

/// Symptom assessment response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessRes {
    /// "urgent" or "routine".
    pub triage_level: String,
    pub triage_reason: Vec<String>,
    /// At most five entries, highest score first.
    pub likely_conditions: Vec<LikelyConditionRes>,
    pub advice: Vec<String>,
}

impl From<LikelyCondition> for LikelyConditionRes {
    fn from(value: LikelyCondition) -> Self {
        Self {
            condition: value.condition,
            score: value.score,
        }
    }
}

impl From<AssessmentResult> for AssessRes {
    fn from(result: AssessmentResult) -> Self {
        Self {
            triage_level: result.triage_level.to_string(),
            triage_reason: result.triage_reason,
            likely_conditions: result
                .likely_conditions
                .into_iter()
                .map(LikelyConditionRes::from)
                .collect(),
            advice: result.advice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::TriageLevel;

    fn request(age: u32) -> AssessReq {
        AssessReq {
            age,
            sex: None,
            symptoms: vec!["fever".into()],
            duration_days: Some(2),
            notes: None,
        }
    }

    #[test]
    fn accepts_age_bounds() {
        assert_eq!(request(0).validate().expect("age 0 is valid").age, 0);
        assert_eq!(request(120).validate().expect("age 120 is valid").age, 120);
    }

    #[test]
    fn rejects_age_above_maximum() {
        let err = request(121).validate().expect_err("age 121 is invalid");
        assert_eq!(err, ValidationError::AgeOutOfRange { age: 121, max: 120 });
        assert!(err.to_string().contains("121"));
    }

    #[test]
    fn absent_notes_become_empty() {
        let input = request(30).validate().expect("valid request");
        assert_eq!(input.notes, "");
        assert_eq!(input.duration_days, Some(2));
    }

    #[test]
    fn deserialises_minimal_request() {
        let req: AssessReq =
            serde_json::from_str(r#"{"age": 30, "symptoms": ["fever", "cough"]}"#)
                .expect("parse request");
        assert_eq!(req.symptoms, vec!["fever", "cough"]);
        assert!(req.sex.is_none());
        assert!(req.duration_days.is_none());
        assert!(req.notes.is_none());
    }

    #[test]
    fn rejects_missing_symptoms() {
        let err = serde_json::from_str::<AssessReq>(r#"{"age": 30}"#)
            .expect_err("symptoms are required");
        assert!(err.to_string().contains("symptoms"));
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(serde_json::from_str::<AssessReq>(
            r#"{"age": 30, "symptoms": [], "duration_days": -1}"#
        )
        .is_err());
    }

    #[test]
    fn converts_engine_result() {
        let result = AssessmentResult {
            triage_level: TriageLevel::Urgent,
            triage_reason: vec!["Seek emergency care immediately.".into()],
            likely_conditions: vec![LikelyCondition {
                condition: "Flu".into(),
                score: 2.0,
            }],
            advice: vec!["This is a demo, not medical advice.".into()],
        };

        let res = AssessRes::from(result);
        assert_eq!(res.triage_level, "urgent");
        assert_eq!(res.likely_conditions[0].condition, "Flu");
        assert_eq!(res.likely_conditions[0].score, 2.0);
    }
}
