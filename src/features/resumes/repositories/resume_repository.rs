use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::resumes::models::{NewResume, Resume};

/// Persistence contract for resume records.
///
/// Records are append-only. Every read takes the owner id and must filter on
/// it so that other users' rows are never observable.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn insert(&self, resume: NewResume) -> Result<Resume>;

    /// All records of `owner_id`, newest upload first
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Resume>>;

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<Resume>>;
}

/// PostgreSQL-backed repository
pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn insert(&self, resume: NewResume) -> Result<Resume> {
        let row = sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes
                (id, owner_id, stored_file_name, original_file_name, mime_type, size_bytes, file_key, analysis)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, stored_file_name, original_file_name, mime_type,
                      size_bytes, file_key, uploaded_at, analysis
            "#,
        )
        .bind(resume.id)
        .bind(&resume.owner_id)
        .bind(&resume.stored_file_name)
        .bind(&resume.original_file_name)
        .bind(&resume.mime_type)
        .bind(resume.size_bytes)
        .bind(&resume.file_key)
        .bind(Json(&resume.analysis))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Resume>> {
        let rows = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, owner_id, stored_file_name, original_file_name, mime_type,
                   size_bytes, file_key, uploaded_at, analysis
            FROM resumes
            WHERE owner_id = $1
            ORDER BY uploaded_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<Resume>> {
        let row = sqlx::query_as::<_, Resume>(
            r#"
            SELECT id, owner_id, stored_file_name, original_file_name, mime_type,
                   size_bytes, file_key, uploaded_at, analysis
            FROM resumes
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
