mod resume_service;
pub mod text_extractor;

pub use resume_service::{ResumeService, ResumeServiceSettings};
