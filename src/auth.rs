use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ApiError;

/// Roles allowed to read pre-assessment results and status.
pub const DASHBOARD_ROLES: &[&str] = &["admin", "teacher", "parent"];

/// Roles allowed to read assessment definitions (template library).
pub const TEMPLATE_ROLES: &[&str] = &["admin", "teacher"];

/// The authenticated caller as decoded from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    email: String,
    #[serde(default)]
    roles: Vec<String>,
    exp: i64,
}

/// Token verification seam. The platform's auth service issues the tokens;
/// this service only verifies and decodes them.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Principal, ApiError>;
}

/// HS256 verification against the shared platform secret.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Principal, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!(error = %e, "Token verification failed");
            ApiError::Unauthorized("invalid or expired token".to_string())
        })?;

        debug!(email = %data.claims.email, roles = ?data.claims.roles, "Token verified");
        Ok(Principal {
            email: data.claims.email,
            roles: data.claims.roles,
        })
    }
}

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_string()))?;
    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed Authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("expected a bearer token".to_string()))
}

/// Map a role onto its canonical English name. The platform's auth service
/// also issues Filipino role names ("guro", "magulang"); unknown roles pass
/// through lowercased.
pub fn canonical_role(role: &str) -> String {
    let lowered = role.trim().to_lowercase();
    match lowered.as_str() {
        "guro" => "teacher".to_string(),
        "magulang" => "parent".to_string(),
        _ => lowered,
    }
}

/// Check that the caller's canonicalized roles intersect the allow-list.
pub fn authorize(principal: &Principal, allowed: &[&str]) -> Result<(), ApiError> {
    let has_role = principal
        .roles
        .iter()
        .map(|role| canonical_role(role))
        .any(|role| allowed.contains(&role.as_str()));

    if has_role {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "caller roles {:?} do not intersect the endpoint allow-list",
            principal.roles
        )))
    }
}
