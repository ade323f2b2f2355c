mod resume_repository;

pub use resume_repository::{PgResumeRepository, ResumeRepository};
