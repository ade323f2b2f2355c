use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::AnalysisResult;

/// Database model for an uploaded resume
#[derive(Debug, Clone, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub owner_id: String,
    pub stored_file_name: String,
    pub original_file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    /// Blob key in object storage, never exposed over HTTP
    pub file_key: String,
    pub uploaded_at: DateTime<Utc>,
    pub analysis: Json<AnalysisResult>,
}

/// Everything needed to insert a record. `uploaded_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub id: Uuid,
    pub owner_id: String,
    pub stored_file_name: String,
    pub original_file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub file_key: String,
    pub analysis: AnalysisResult,
}
