use axum::{http::StatusCode, response::Json};
use serde_json::{Value, json};
use tracing::{error, info, warn};

/// Centralized error types for consistent API error handling
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Student not found")]
    StudentNotFound,

    /// The student exists but has never completed a pre-assessment. A
    /// legitimate state, surfaced with `hasCompleted: false` so callers can
    /// tell it apart from a system error.
    #[error("No pre-assessment results found for this student")]
    ResponseNotFound,

    /// A response references a definition id that does not exist. Indicates a
    /// data-seeding bug, so the missing id is named in the response.
    #[error("Assessment definition '{0}' not found")]
    DefinitionMissing(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] anyhow::Error),
}

/// Error context for structured logging
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub resource_id: Option<String>,
    pub resource_type: String,
}

impl ErrorContext {
    pub fn new(operation: &str, resource_type: &str) -> Self {
        Self {
            operation: operation.to_string(),
            resource_id: None,
            resource_type: resource_type.to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.resource_id = Some(id.to_string());
        self
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StudentNotFound
            | ApiError::ResponseNotFound
            | ApiError::DefinitionMissing(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert API error to HTTP response with consistent structure and logging.
    /// Body shapes follow the platform's wire contract: `{"message": ...}`
    /// plus variant-specific fields.
    pub fn to_response_with_context(self, context: ErrorContext) -> (StatusCode, Json<Value>) {
        let status = self.status();
        match &self {
            ApiError::StudentNotFound => {
                info!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    resource_id = ?context.resource_id,
                    "Student not found"
                );
                (status, Json(json!({ "message": "Student not found" })))
            }
            ApiError::ResponseNotFound => {
                info!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    resource_id = ?context.resource_id,
                    "No pre-assessment response for student"
                );
                (
                    status,
                    Json(json!({
                        "message": "No pre-assessment results found for this student",
                        "hasCompleted": false,
                    })),
                )
            }
            ApiError::DefinitionMissing(assessment_id) => {
                warn!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    resource_id = ?context.resource_id,
                    assessment_id = %assessment_id,
                    "Response references a missing assessment definition"
                );
                (
                    status,
                    Json(json!({
                        "message": format!("Assessment definition '{}' not found", assessment_id),
                    })),
                )
            }
            ApiError::Unauthorized(reason) => {
                warn!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    reason = %reason,
                    "Request rejected: unauthorized"
                );
                (status, Json(json!({ "message": "Authentication required" })))
            }
            ApiError::Forbidden(reason) => {
                warn!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    reason = %reason,
                    "Request rejected: forbidden"
                );
                (status, Json(json!({ "message": "Access denied" })))
            }
            ApiError::DatabaseError(e) => {
                error!(
                    operation = %context.operation,
                    resource_type = %context.resource_type,
                    resource_id = ?context.resource_id,
                    error = %e,
                    "Database error"
                );
                (
                    status,
                    Json(json!({
                        "message": "Error fetching pre-assessment results",
                        "error": e.to_string(),
                    })),
                )
            }
        }
    }

    /// Simple conversion without context
    pub fn to_response(self) -> (StatusCode, Json<Value>) {
        let context = ErrorContext::new("unknown", "resource");
        self.to_response_with_context(context)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_creation() {
        let context = ErrorContext::new("get_student_results", "pre-assessment").with_id("123");

        assert_eq!(context.operation, "get_student_results");
        assert_eq!(context.resource_type, "pre-assessment");
        assert_eq!(context.resource_id, Some("123".to_string()));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::StudentNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::ResponseNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::DefinitionMissing("FL-G1-001".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unauthorized("no token".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("wrong role".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::DatabaseError(anyhow::anyhow!("pool closed")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_not_found_carries_completion_flag() {
        let (status, Json(body)) = ApiError::ResponseNotFound.to_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["hasCompleted"], false);
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("No pre-assessment results")
        );
    }

    #[test]
    fn test_definition_missing_names_the_id() {
        let (status, Json(body)) =
            ApiError::DefinitionMissing("FL-G1-001".to_string()).to_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("FL-G1-001"));
    }

    #[test]
    fn test_database_error_echoes_message() {
        let (status, Json(body)) =
            ApiError::DatabaseError(anyhow::anyhow!("connection refused")).to_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "connection refused");
    }
}
