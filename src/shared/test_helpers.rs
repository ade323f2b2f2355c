#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::resumes::models::{NewResume, Resume};
#[cfg(test)]
use crate::features::resumes::repositories::ResumeRepository;
#[cfg(test)]
use crate::modules::storage::BlobStorage;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// HS256 token for `user_id`, valid for one hour, signed with [`TEST_JWT_SECRET`]
#[cfg(test)]
pub fn mint_token(user_id: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    mint_token_with(
        serde_json::json!({ "userId": user_id, "exp": exp }),
        TEST_JWT_SECRET,
    )
}

#[cfg(test)]
pub fn mint_token_with(claims: serde_json::Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to sign test token")
}

// =============================================================================
// IN-MEMORY RESUME STORE
// =============================================================================

/// Vec-backed repository. Rows come back newest first by insertion order.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryResumeRepository {
    rows: Mutex<Vec<Resume>>,
}

#[cfg(test)]
impl InMemoryResumeRepository {
    pub fn all(&self) -> Vec<Resume> {
        self.rows.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn insert(&self, resume: NewResume) -> Result<Resume> {
        let row = Resume {
            id: resume.id,
            owner_id: resume.owner_id,
            stored_file_name: resume.stored_file_name,
            original_file_name: resume.original_file_name,
            mime_type: resume.mime_type,
            size_bytes: resume.size_bytes,
            file_key: resume.file_key,
            uploaded_at: chrono::Utc::now(),
            analysis: sqlx::types::Json(resume.analysis),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Resume>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: &str) -> Result<Option<Resume>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }
}

/// Repository whose every call fails like a lost database connection
#[cfg(test)]
pub struct FailingResumeRepository;

#[cfg(test)]
#[async_trait]
impl ResumeRepository for FailingResumeRepository {
    async fn insert(&self, _resume: NewResume) -> Result<Resume> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<Resume>> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_id_and_owner(&self, _id: Uuid, _owner_id: &str) -> Result<Option<Resume>> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
}

// =============================================================================
// IN-MEMORY BLOB STORAGE
// =============================================================================

#[cfg(test)]
#[derive(Default)]
pub struct InMemoryBlobStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl InMemoryBlobStorage {
    pub fn contains(&self, key: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<()> {
        self.blobs.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
pub struct FailingBlobStorage;

#[cfg(test)]
#[async_trait]
impl BlobStorage for FailingBlobStorage {
    async fn put(&self, key: &str, _data: Vec<u8>, _content_type: &str) -> Result<()> {
        Err(AppError::Internal(format!(
            "Failed to upload file '{}': connection refused",
            key
        )))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        Err(AppError::Internal(format!(
            "Failed to delete file '{}': connection refused",
            key
        )))
    }
}
