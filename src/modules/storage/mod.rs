//! Storage module for uploaded resume files
//!
//! [`BlobStorage`] is the seam the resume service writes through;
//! [`MinIOClient`] implements it against MinIO or any S3-compatible service.

mod blob_storage;
mod minio_client;

pub use blob_storage::BlobStorage;
pub use minio_client::MinIOClient;
