use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Json, Response},
    routing::get,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    auth::{self, TokenVerifier},
    errors::ErrorContext,
    models::{AssessmentDefinition, AssessmentResultView, PreAssessmentStatus},
    result_service::ResultService,
};

// Import logging macros
use crate::{log_api_start, log_api_success};

#[derive(Clone)]
pub struct AppState {
    pub result_service: ResultService,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

/// Full pre-assessment results for one student, identified by primary key or
/// enrollment id number.
pub async fn get_student_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssessmentResultView>, (StatusCode, Json<Value>)> {
    log_api_start!("get_student_results", student_id = id);

    match state.result_service.student_results(&id).await {
        Ok(view) => {
            log_api_success!("get_student_results", student_id = id, "results composed");
            Ok(Json(view))
        }
        Err(e) => {
            let context = ErrorContext::new("get_student_results", "pre-assessment").with_id(&id);
            Err(e.to_response_with_context(context))
        }
    }
}

/// Completion status only; no definition lookup or composition.
pub async fn get_student_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PreAssessmentStatus>, (StatusCode, Json<Value>)> {
    log_api_start!("get_student_status", student_id = id);

    match state.result_service.status(&id).await {
        Ok(status) => {
            log_api_success!("get_student_status", student_id = id, "status resolved");
            Ok(Json(status))
        }
        Err(e) => {
            let context = ErrorContext::new("get_student_status", "pre-assessment").with_id(&id);
            Err(e.to_response_with_context(context))
        }
    }
}

/// Stored assessment definition, for the template-library surface.
pub async fn get_definition(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssessmentDefinition>, (StatusCode, Json<Value>)> {
    log_api_start!("get_definition", assessment_id = id);

    match state.result_service.definition(&id).await {
        Ok(definition) => {
            log_api_success!("get_definition", assessment_id = id, "definition retrieved");
            Ok(Json(definition))
        }
        Err(e) => {
            let context = ErrorContext::new("get_definition", "assessment definition").with_id(&id);
            Err(e.to_response_with_context(context))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn require_roles(
    state: AppState,
    request: Request,
    next: Next,
    allowed: &[&str],
) -> Result<Response, (StatusCode, Json<Value>)> {
    let gate = auth::bearer_token(request.headers())
        .and_then(|token| state.token_verifier.verify(token))
        .and_then(|principal| {
            auth::authorize(&principal, allowed)?;
            Ok(principal)
        });

    match gate {
        Ok(principal) => {
            debug!(email = %principal.email, "Request authorized");
            Ok(next.run(request).await)
        }
        Err(e) => {
            let context = ErrorContext::new("authorize", "request");
            Err(e.to_response_with_context(context))
        }
    }
}

async fn require_dashboard_role(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    require_roles(state, request, next, auth::DASHBOARD_ROLES).await
}

async fn require_template_role(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    require_roles(state, request, next, auth::TEMPLATE_ROLES).await
}

pub fn create_router(state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/api/pre-assessment/student-results/:id", get(get_student_results))
        .route("/api/pre-assessment/status/:id", get(get_student_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_dashboard_role,
        ));

    let template_routes = Router::new()
        .route("/api/pre-assessment/definitions/:id", get(get_definition))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_template_role,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(dashboard_routes)
        .merge(template_routes)
        .with_state(state)
}
