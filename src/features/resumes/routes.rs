use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::resumes::handlers::{
    get_resume_analysis, list_resumes, upload_resume, upload_resume_legacy,
};
use crate::features::resumes::services::ResumeService;

/// Headroom for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create routes for the resumes feature
pub fn routes(resume_service: Arc<ResumeService>) -> Router {
    let body_limit = DefaultBodyLimit::max(resume_service.max_file_size() + MULTIPART_OVERHEAD);

    Router::new()
        .route(
            "/api/resumes",
            post(upload_resume)
                .layer(body_limit.clone())
                .get(list_resumes),
        )
        .route(
            "/api/resume-upload",
            post(upload_resume_legacy).layer(body_limit),
        )
        .route("/api/resumes/{id}/analysis", get(get_resume_analysis))
        .with_state(resume_service)
}
