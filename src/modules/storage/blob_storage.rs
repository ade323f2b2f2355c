use async_trait::async_trait;

use crate::core::error::AppError;

/// Object storage for raw upload bytes
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `data` under `key`, replacing nothing: keys are unique per record
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}
