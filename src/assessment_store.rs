use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::log_store_operation;
use crate::models::{AssessmentDefinition, AssessmentResponse};

/// Read access to the assessment database: submitted responses and the
/// definitions they were answered against.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Exact match on the loosely-typed linking field. Responses are
    /// append-only per attempt; the most recently completed match wins.
    async fn find_response_by_link(&self, link_value: &str) -> Result<Option<AssessmentResponse>>;
    async fn find_definition(&self, assessment_id: &str) -> Result<Option<AssessmentDefinition>>;
}

#[derive(Clone)]
pub struct SqliteAssessmentStore {
    pool: SqlitePool,
}

impl SqliteAssessmentStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        let store = SqliteAssessmentStore { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        // answers, category_scores, and difficulty_breakdown hold JSON text,
        // mirroring the document shapes the submitting services write
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                assessment_id TEXT,
                answers TEXT NOT NULL,
                category_scores TEXT NOT NULL,
                reading_level TEXT,
                reading_percentage REAL,
                part1_score REAL,
                time_taken_seconds INTEGER,
                difficulty_breakdown TEXT,
                completed_at TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS definitions (
                assessment_id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                language TEXT,
                questions TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        log_store_operation!(info, "migrate", "assessment store initialized");
        Ok(())
    }

    pub async fn insert_response(&self, response: &AssessmentResponse) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO responses (id, user_id, assessment_id, answers, category_scores,
                                   reading_level, reading_percentage, part1_score,
                                   time_taken_seconds, difficulty_breakdown, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(response.id.to_string())
        .bind(&response.user_id)
        .bind(&response.assessment_id)
        .bind(serde_json::to_string(&response.answers)?)
        .bind(serde_json::to_string(&response.category_scores)?)
        .bind(&response.reading_level)
        .bind(response.reading_percentage)
        .bind(response.part1_score)
        .bind(response.time_taken_seconds)
        .bind(
            response
                .difficulty_breakdown
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        )
        .bind(response.completed_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert_definition(&self, definition: &AssessmentDefinition) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO definitions (assessment_id, title, language, questions)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&definition.assessment_id)
        .bind(&definition.title)
        .bind(&definition.language)
        .bind(serde_json::to_string(&definition.questions)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_response(row: &sqlx::sqlite::SqliteRow) -> Result<AssessmentResponse> {
        Ok(AssessmentResponse {
            id: Uuid::parse_str(&row.get::<String, _>("id"))?,
            user_id: row.get("user_id"),
            assessment_id: row.get("assessment_id"),
            answers: serde_json::from_str(&row.get::<String, _>("answers"))?,
            category_scores: serde_json::from_str(&row.get::<String, _>("category_scores"))?,
            reading_level: row.get("reading_level"),
            reading_percentage: row.get("reading_percentage"),
            part1_score: row.get("part1_score"),
            time_taken_seconds: row.get("time_taken_seconds"),
            difficulty_breakdown: row
                .get::<Option<String>, _>("difficulty_breakdown")
                .map(|s| serde_json::from_str(&s))
                .transpose()?,
            completed_at: row
                .get::<Option<String>, _>("completed_at")
                .and_then(|s| {
                    chrono::DateTime::parse_from_rfc3339(&s)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                }),
        })
    }
}

#[async_trait]
impl AssessmentRepository for SqliteAssessmentStore {
    async fn find_response_by_link(&self, link_value: &str) -> Result<Option<AssessmentResponse>> {
        let row = sqlx::query(
            "SELECT * FROM responses WHERE user_id = ?1 ORDER BY completed_at DESC LIMIT 1",
        )
        .bind(link_value)
        .fetch_optional(&self.pool)
        .await?;

        log_store_operation!(debug, "find_response_by_link", link_value = link_value, found = row.is_some());
        row.as_ref().map(Self::row_to_response).transpose()
    }

    async fn find_definition(&self, assessment_id: &str) -> Result<Option<AssessmentDefinition>> {
        let row = sqlx::query("SELECT * FROM definitions WHERE assessment_id = ?1")
            .bind(assessment_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(AssessmentDefinition {
            assessment_id: row.get("assessment_id"),
            title: row.get("title"),
            language: row.get("language"),
            questions: serde_json::from_str(&row.get::<String, _>("questions"))?,
        }))
    }
}
