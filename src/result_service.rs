use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::assessment_store::AssessmentRepository;
use crate::composer;
use crate::errors::ApiError;
use crate::identity_store::IdentityRepository;
use crate::log_pipeline_stage;
use crate::models::{
    AssessmentDefinition, AssessmentResponse, AssessmentResultView, PreAssessmentStatus, Student,
};

/// Orchestrates the pre-assessment result pipeline over the two stores.
/// Read-only: every stage is a point query, no retries, no partial results.
#[derive(Clone)]
pub struct ResultService {
    identity: Arc<dyn IdentityRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    default_assessment_id: String,
}

impl ResultService {
    pub fn new(
        identity: Arc<dyn IdentityRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        default_assessment_id: String,
    ) -> Self {
        Self {
            identity,
            assessments,
            default_assessment_id,
        }
    }

    /// Locate a student by primary key, falling back to the enrollment id
    /// number when the identifier is not a valid key or matches no record.
    pub async fn resolve_student(&self, identifier: &str) -> Result<Option<Student>, ApiError> {
        if let Ok(id) = Uuid::parse_str(identifier) {
            log_pipeline_stage!("resolve_student", identifier = identifier, "trying primary-key lookup");
            if let Some(student) = self.identity.find_by_id(id).await? {
                return Ok(Some(student));
            }
        }

        log_pipeline_stage!("resolve_student", identifier = identifier, "falling back to id-number lookup");
        Ok(self.identity.find_by_id_number(identifier).await?)
    }

    /// Candidate linking values in priority order: enrollment id number,
    /// primary key, then the original caller-supplied identifier. Empty and
    /// duplicate values are skipped.
    pub fn link_candidates(student: &Student, fallback_identifier: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        for value in [
            student.id_number.clone().unwrap_or_default(),
            student.id.to_string(),
            fallback_identifier.to_string(),
        ] {
            if !value.is_empty() && !candidates.contains(&value) {
                candidates.push(value);
            }
        }
        candidates
    }

    /// Find the student's submitted response by trying each candidate linking
    /// value against the response store. `None` is a legitimate state: the
    /// student has simply never completed a pre-assessment.
    pub async fn find_response(
        &self,
        student: &Student,
        fallback_identifier: &str,
    ) -> Result<Option<AssessmentResponse>, ApiError> {
        for candidate in Self::link_candidates(student, fallback_identifier) {
            log_pipeline_stage!("find_response", identifier = candidate, "trying linking candidate");
            if let Some(response) = self.assessments.find_response_by_link(&candidate).await? {
                debug!(
                    student_id = %student.id,
                    response_id = %response.id,
                    matched_candidate = %candidate,
                    "Response located"
                );
                return Ok(Some(response));
            }
        }
        Ok(None)
    }

    /// Resolve the definition the response was answered against. A response
    /// that recorded no assessment id falls back to the configured default;
    /// a missing definition is a data inconsistency, not a user error.
    pub async fn definition_for(
        &self,
        response: &AssessmentResponse,
    ) -> Result<AssessmentDefinition, ApiError> {
        let assessment_id = match &response.assessment_id {
            Some(id) => id.clone(),
            None => {
                warn!(
                    response_id = %response.id,
                    default_assessment_id = %self.default_assessment_id,
                    "Response recorded no assessment id, using default"
                );
                self.default_assessment_id.clone()
            }
        };

        log_pipeline_stage!("definition_lookup", identifier = assessment_id, "fetching assessment definition");
        match self.assessments.find_definition(&assessment_id).await? {
            Some(definition) => Ok(definition),
            None => Err(ApiError::DefinitionMissing(assessment_id)),
        }
    }

    /// Full pipeline: resolve, locate, look up the definition, compose.
    pub async fn student_results(
        &self,
        identifier: &str,
    ) -> Result<AssessmentResultView, ApiError> {
        let student = self
            .resolve_student(identifier)
            .await?
            .ok_or(ApiError::StudentNotFound)?;
        let response = self
            .find_response(&student, identifier)
            .await?
            .ok_or(ApiError::ResponseNotFound)?;
        let definition = self.definition_for(&response).await?;

        Ok(composer::compose(&response, &definition, &student))
    }

    /// Status-only variant: resolution and location, no composition. Always
    /// succeeds once the student resolves.
    pub async fn status(&self, identifier: &str) -> Result<PreAssessmentStatus, ApiError> {
        let student = self
            .resolve_student(identifier)
            .await?
            .ok_or(ApiError::StudentNotFound)?;
        let response = self.find_response(&student, identifier).await?;
        let has_completed = response.is_some();

        Ok(PreAssessmentStatus {
            student_id: student.display_id(),
            has_completed,
            pre_assessment_completed: has_completed,
            reading_level: response
                .as_ref()
                .and_then(|r| r.reading_level.clone())
                .or(student.reading_level),
            last_assessment_date: response.and_then(|r| r.completed_at),
        })
    }

    /// Direct definition read for the template-library surface.
    pub async fn definition(&self, assessment_id: &str) -> Result<AssessmentDefinition, ApiError> {
        match self.assessments.find_definition(assessment_id).await? {
            Some(definition) => Ok(definition),
            None => Err(ApiError::DefinitionMissing(assessment_id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id_number: Option<&str>) -> Student {
        Student {
            id: Uuid::new_v4(),
            id_number: id_number.map(str::to_string),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            reading_level: None,
        }
    }

    #[test]
    fn test_link_candidates_priority_order() {
        let student = student(Some("20250001"));
        let candidates = ResultService::link_candidates(&student, "caller-supplied");

        assert_eq!(
            candidates,
            vec![
                "20250001".to_string(),
                student.id.to_string(),
                "caller-supplied".to_string(),
            ]
        );
    }

    #[test]
    fn test_link_candidates_skips_missing_id_number() {
        let student = student(None);
        let candidates = ResultService::link_candidates(&student, "caller-supplied");

        assert_eq!(
            candidates,
            vec![student.id.to_string(), "caller-supplied".to_string()]
        );
    }

    #[test]
    fn test_link_candidates_deduplicates() {
        let student = student(Some("20250001"));
        // Caller looked the student up by id number, so the fallback repeats it
        let candidates = ResultService::link_candidates(&student, "20250001");

        assert_eq!(
            candidates,
            vec!["20250001".to_string(), student.id.to_string()]
        );
    }
}
