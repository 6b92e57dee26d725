pub mod api;
pub mod assessment_store;
pub mod auth;
pub mod categories;
pub mod composer;
pub mod config;
pub mod errors;
pub mod identity_store;
pub mod logging;
pub mod models;
pub mod result_service;

pub use assessment_store::{AssessmentRepository, SqliteAssessmentStore};
pub use auth::{JwtVerifier, Principal, TokenVerifier};
pub use config::Config;
pub use errors::*;
pub use identity_store::{IdentityRepository, SqliteIdentityStore};
pub use models::*;
pub use result_service::ResultService;
