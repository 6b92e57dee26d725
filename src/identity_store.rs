use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::log_store_operation;
use crate::models::Student;

/// Read access to the identity database. Kept separate from the assessment
/// store: the two are independent stores with no cross-store transaction.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>>;
    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Student>>;
}

#[derive(Clone)]
pub struct SqliteIdentityStore {
    pool: SqlitePool,
}

impl SqliteIdentityStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;
        let store = SqliteIdentityStore { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                id_number TEXT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                reading_level TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        log_store_operation!(info, "migrate", "identity store initialized");
        Ok(())
    }

    pub async fn insert_student(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, id_number, first_name, last_name, reading_level)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(student.id.to_string())
        .bind(&student.id_number)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.reading_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_student(row: &sqlx::sqlite::SqliteRow) -> Result<Student> {
        Ok(Student {
            id: Uuid::parse_str(&row.get::<String, _>("id"))?,
            id_number: row.get("id_number"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            reading_level: row.get("reading_level"),
        })
    }
}

#[async_trait]
impl IdentityRepository for SqliteIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Student>> {
        // id_number is stored stringified; numeric callers compare as strings
        let row = sqlx::query("SELECT * FROM users WHERE id_number = ?1")
            .bind(id_number)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_student).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_store() -> SqliteIdentityStore {
        SqliteIdentityStore::new("sqlite::memory:").await.unwrap()
    }

    fn sample_student(id_number: Option<&str>) -> Student {
        Student {
            id: Uuid::new_v4(),
            id_number: id_number.map(str::to_string),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            reading_level: Some("Developing".to_string()),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_roundtrip() {
        let store = create_test_store().await;
        let student = sample_student(Some("20250001"));
        store.insert_student(&student).await.unwrap();

        let found = store.find_by_id(student.id).await.unwrap().unwrap();
        assert_eq!(found.id, student.id);
        assert_eq!(found.id_number, Some("20250001".to_string()));
        assert_eq!(found.full_name(), "Juan Dela Cruz");
    }

    #[tokio::test]
    async fn test_find_by_id_number() {
        let store = create_test_store().await;
        let student = sample_student(Some("20250002"));
        store.insert_student(&student).await.unwrap();

        let found = store.find_by_id_number("20250002").await.unwrap().unwrap();
        assert_eq!(found.id, student.id);

        let missing = store.find_by_id_number("99999999").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_missing_student() {
        let store = create_test_store().await;
        let found = store.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }
}
