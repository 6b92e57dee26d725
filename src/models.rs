use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub id_number: Option<String>, // external enrollment identifier, stored stringified
    pub first_name: String,
    pub last_name: String,
    pub reading_level: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Identifier shown to callers: the enrollment id number when present,
    /// the primary key otherwise.
    pub fn display_id(&self) -> String {
        self.id_number
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Pre-aggregated score entry for one category, as recorded on the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub total: i64,
    pub correct: i64,
    pub score: f64,
}

/// One completed pre-assessment attempt. `user_id` is the loosely-typed
/// linking field: depending on which service wrote the record it may hold the
/// student's primary key or the enrollment id number, always as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub user_id: String,
    pub assessment_id: Option<String>,
    pub answers: HashMap<String, String>, // question id -> submitted option id/value
    pub category_scores: HashMap<String, CategoryScore>,
    pub reading_level: Option<String>,
    pub reading_percentage: Option<f64>,
    pub part1_score: Option<f64>,
    pub time_taken_seconds: Option<i64>,
    pub difficulty_breakdown: Option<serde_json::Value>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub option_id: String,
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassagePage {
    pub page_number: i32,
    pub page_text: String,
    #[serde(default)]
    pub page_image: Option<String>,
}

/// Comprehension sub-question embedded in a reading passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionQuestion {
    pub question_text: String,
    pub correct_answer: String,
    pub incorrect_answer: String,
}

/// A question inside an assessment definition. Standard categories carry
/// `options`; reading comprehension carries `passages` plus embedded
/// `comprehension_questions` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String,
    pub question_number: i32,
    pub question_type_id: String, // category key
    pub question_text: String,
    #[serde(default)]
    pub question_image: Option<String>,
    #[serde(default)]
    pub question_audio: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub passages: Vec<PassagePage>,
    #[serde(default)]
    pub comprehension_questions: Vec<ComprehensionQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDefinition {
    pub assessment_id: String,
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    pub questions: Vec<Question>,
}

// View types returned by the API. Field names follow the platform's wire
// contract (camelCase).

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardQuestionResult {
    pub question_id: String,
    pub question_number: i32,
    pub question_text: String,
    pub question_image: Option<String>,
    pub question_audio: Option<String>,
    pub difficulty_level: Option<String>,
    pub student_answer: Option<String>, // text of the option the student picked
    pub correct_answer: Option<String>, // text of the option flagged correct
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionQuestionResult {
    pub question_id: String,
    pub question_number: i32,
    pub question_text: String,
    pub passages: Vec<PassagePage>,
    pub passage_text: String, // all pages joined in page order
    pub comprehension_question: Option<String>,
    pub correct_answer: Option<String>,
    pub incorrect_answer: Option<String>,
    pub all_questions: Vec<ComprehensionQuestion>,
    pub student_answer: Option<String>,
    pub is_correct: bool,
}

/// The two per-question record shapes. Untagged so each serializes as its own
/// flat object, matching the original API.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuestionBreakdown {
    Standard(StandardQuestionResult),
    Comprehension(ComprehensionQuestionResult),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub category_name: String,
    pub score: f64,
    pub correct: i64,
    pub total: i64,
    pub questions: Vec<QuestionBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResultView {
    pub student_id: String,
    pub student_name: String,
    pub assessment_id: String,
    pub reading_level: Option<String>,
    pub overall_score: Option<f64>,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub part1_score: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_taken: Option<i64>,
    pub category_scores: HashMap<String, CategoryScore>,
    pub difficulty_breakdown: Option<serde_json::Value>,
    pub skill_details: Vec<CategorySummary>,
    pub focus_areas: Vec<String>,
    pub has_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreAssessmentStatus {
    pub student_id: String,
    pub has_completed: bool,
    pub pre_assessment_completed: bool,
    pub reading_level: Option<String>,
    pub last_assessment_date: Option<DateTime<Utc>>,
}
