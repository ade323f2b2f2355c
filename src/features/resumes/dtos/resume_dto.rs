use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::resumes::models::{AnalysisResult, Resume};

/// Multipart field carrying the resume file
pub const RESUME_FIELD: &str = "resume";

/// Allowed MIME types for resume uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "text/markdown",
];

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "application/pdf" => Some("pdf"),
        "application/msword" => Some("doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        "text/plain" => Some("txt"),
        "text/markdown" => Some("md"),
        _ => None,
    }
}

lazy_static! {
    /// Characters kept in a client-supplied filename; everything else becomes `_`
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._ ()-]").unwrap();
}

/// Strip any directory components and unsafe characters from a client filename.
///
/// - `"../../etc/passwd"` becomes `"passwd"`
/// - `"C:\\cv\\My Resume.pdf"` becomes `"My Resume.pdf"`
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    UNSAFE_FILENAME_CHARS
        .replace_all(base, "_")
        .trim_matches('.')
        .to_string()
}

fn validate_mime_type(content_type: &str) -> Result<(), ValidationError> {
    if is_mime_type_allowed(content_type) {
        Ok(())
    } else {
        let mut error = ValidationError::new("mime_type");
        error.message = Some(
            format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_MIME_TYPES.join(", ")
            )
            .into(),
        );
        Err(error)
    }
}

/// Upload request DTO for OpenAPI documentation.
/// The handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadResumeDto {
    /// The resume file (PDF, Word or plain text)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub resume: String,
}

/// A received file, validated before any text is extracted
#[derive(Debug, Validate)]
pub struct ResumeUpload {
    #[validate(length(min = 1, max = 255, message = "Filename is required"))]
    pub original_file_name: String,
    #[validate(custom(function = "validate_mime_type"))]
    pub mime_type: String,
    #[validate(length(min = 1, message = "Uploaded file is empty"))]
    pub data: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(original_file_name: &str, mime_type: &str, data: Vec<u8>) -> Self {
        Self {
            original_file_name: sanitize_file_name(original_file_name),
            mime_type: normalize_mime_type(mime_type),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Lowercase and drop parameters such as `; charset=utf-8`
pub fn normalize_mime_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Returned by the upload endpoint. The analysis is fetched separately.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummaryDto {
    pub id: Uuid,
    #[schema(example = "0192b7c4-5d1e-7a8b-9c0d-1e2f3a4b5c6d.pdf")]
    pub stored_file_name: String,
    #[schema(example = "jane-doe-resume.pdf")]
    pub original_file_name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Resume> for ResumeSummaryDto {
    fn from(resume: &Resume) -> Self {
        Self {
            id: resume.id,
            stored_file_name: resume.stored_file_name.clone(),
            original_file_name: resume.original_file_name.clone(),
            uploaded_at: resume.uploaded_at,
        }
    }
}

/// One entry of the caller's resume list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponseDto {
    pub id: Uuid,
    pub owner_id: String,
    pub stored_file_name: String,
    pub original_file_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
    pub analysis: AnalysisResult,
}

impl From<Resume> for ResumeResponseDto {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id,
            owner_id: resume.owner_id,
            stored_file_name: resume.stored_file_name,
            original_file_name: resume.original_file_name,
            mime_type: resume.mime_type,
            size_bytes: resume.size_bytes,
            uploaded_at: resume.uploaded_at,
            analysis: resume.analysis.0,
        }
    }
}
