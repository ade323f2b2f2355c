use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::RecordId;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::resumes::dtos::{
    ResumeResponseDto, ResumeSummaryDto, ResumeUpload, UploadResumeDto, RESUME_FIELD,
};
use crate::features::resumes::models::AnalysisResult;
use crate::features::resumes::services::ResumeService;
use crate::shared::types::{ApiResponse, Meta};

/// Upload a resume
///
/// Accepts multipart/form-data with a single `resume` file field. The file is
/// analyzed immediately; fetch the result from the analysis endpoint.
#[utoipa::path(
    post,
    path = "/api/resumes",
    tag = "resumes",
    request_body(
        content = UploadResumeDto,
        content_type = "multipart/form-data",
        description = "Resume file (PDF, Word, plain text or Markdown)",
    ),
    responses(
        (status = 200, description = "Resume uploaded and analyzed", body = ApiResponse<ResumeSummaryDto>),
        (status = 400, description = "No file uploaded or file rejected"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Upload failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_resume(
    user: AuthenticatedUser,
    State(service): State<Arc<ResumeService>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeSummaryDto>>, AppError> {
    let mut upload: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() != Some(RESUME_FIELD) {
            debug!("Ignoring multipart field: {:?}", field.name());
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = field.file_name().unwrap_or("unnamed").to_string();

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some(ResumeUpload::new(&file_name, &content_type, data.to_vec()));
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let summary = service.upload(&user.user_id, upload).await?;

    Ok(Json(ApiResponse::success(
        Some(summary),
        Some("Resume uploaded successfully".to_string()),
        None,
    )))
}

/// Same as [`upload_resume`], served at the path older clients use
#[utoipa::path(
    post,
    path = "/api/resume-upload",
    tag = "resumes",
    request_body(
        content = UploadResumeDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Resume uploaded and analyzed", body = ApiResponse<ResumeSummaryDto>),
        (status = 400, description = "No file uploaded or file rejected"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Upload failed")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_resume_legacy(
    user: AuthenticatedUser,
    state: State<Arc<ResumeService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeSummaryDto>>, AppError> {
    upload_resume(user, state, multipart).await
}

/// List the caller's resumes, newest first
#[utoipa::path(
    get,
    path = "/api/resumes",
    tag = "resumes",
    responses(
        (status = 200, description = "Resumes of the authenticated user", body = ApiResponse<Vec<ResumeResponseDto>>),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Failed to fetch resumes")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_resumes(
    user: AuthenticatedUser,
    State(service): State<Arc<ResumeService>>,
) -> Result<Json<ApiResponse<Vec<ResumeResponseDto>>>, AppError> {
    let resumes = service.list_by_owner(&user.user_id).await?;
    let total = resumes.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(resumes),
        None,
        Some(Meta { total }),
    )))
}

/// Get the analysis of one of the caller's resumes
#[utoipa::path(
    get,
    path = "/api/resumes/{id}/analysis",
    tag = "resumes",
    params(
        ("id" = uuid::Uuid, Path, description = "Resume ID")
    ),
    responses(
        (status = 200, description = "Analysis result", body = ApiResponse<AnalysisResult>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Resume not found"),
        (status = 500, description = "Failed to fetch analysis results")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_resume_analysis(
    user: AuthenticatedUser,
    State(service): State<Arc<ResumeService>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<AnalysisResult>>, AppError> {
    let analysis = service.get_analysis(&user.user_id, id).await?;

    Ok(Json(ApiResponse::success(Some(analysis), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::Arc;

    use crate::core::middleware::auth_middleware;
    use crate::features::auth::JwtValidator;
    use crate::features::resumes::analyzer::ScoringPolicy;
    use crate::features::resumes::repositories::ResumeRepository;
    use crate::features::resumes::routes;
    use crate::features::resumes::services::{ResumeService, ResumeServiceSettings};
    use crate::modules::storage::BlobStorage;
    use crate::shared::test_helpers::{
        mint_token, FailingResumeRepository, InMemoryBlobStorage, InMemoryResumeRepository,
        TEST_JWT_SECRET,
    };

    const FULL_RESUME: &str = "skills, experience, education, achievements, \u{2022} bullet, managed project with team, led effort";

    fn server_with(
        repository: Arc<dyn ResumeRepository>,
        storage: Arc<dyn BlobStorage>,
    ) -> TestServer {
        let service = Arc::new(ResumeService::new(
            repository,
            storage,
            ResumeServiceSettings {
                scoring_policy: ScoringPolicy::Extended,
                max_file_size: 5 * 1024 * 1024,
                key_prefix: "private/resumes".to_string(),
            },
        ));
        let validator = Arc::new(JwtValidator::new(
            TEST_JWT_SECRET.to_string(),
            std::time::Duration::from_secs(0),
        ));
        let app = routes(service)
            .route_layer(axum::middleware::from_fn_with_state(validator, auth_middleware));
        TestServer::new(app).unwrap()
    }

    fn bearer(user_id: &str) -> String {
        format!("Bearer {}", mint_token(user_id))
    }

    fn resume_form(name: &str, text: &str) -> MultipartForm {
        MultipartForm::new().add_part(
            "resume",
            Part::bytes(text.as_bytes().to_vec())
                .file_name(name)
                .mime_type("text/plain"),
        )
    }

    async fn upload(server: &TestServer, user_id: &str, name: &str, text: &str) -> Value {
        let response = server
            .post("/api/resumes")
            .add_header(header::AUTHORIZATION, bearer(user_id))
            .multipart(resume_form(name, text))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["data"].clone()
    }

    #[tokio::test]
    async fn test_upload_returns_summary() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let server = server_with(repository.clone(), Arc::new(InMemoryBlobStorage::default()));

        let data = upload(&server, "alice", "cv.txt", FULL_RESUME).await;

        assert!(data["id"].is_string());
        assert_eq!(data["originalFileName"], "cv.txt");
        assert!(data["storedFileName"].as_str().unwrap().ends_with(".txt"));
        assert!(data["uploadedAt"].is_string());
        assert_eq!(repository.all().len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_upload_path() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let server = server_with(repository.clone(), Arc::new(InMemoryBlobStorage::default()));

        server
            .post("/api/resume-upload")
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .multipart(resume_form("cv.txt", "skills"))
            .await
            .assert_status_ok();

        assert_eq!(repository.all().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_file_persists_nothing() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let storage = Arc::new(InMemoryBlobStorage::default());
        let server = server_with(repository.clone(), storage.clone());

        let response = server
            .post("/api/resumes")
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .multipart(MultipartForm::new().add_text("note", "no file here"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No file uploaded");
        assert!(repository.all().is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_type() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let server = server_with(repository.clone(), Arc::new(InMemoryBlobStorage::default()));

        let form = MultipartForm::new().add_part(
            "resume",
            Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name("cv.png")
                .mime_type("image/png"),
        );
        server
            .post("/api/resumes")
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .multipart(form)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert!(repository.all().is_empty());
    }

    #[tokio::test]
    async fn test_each_user_lists_only_their_own() {
        let server = server_with(
            Arc::new(InMemoryResumeRepository::default()),
            Arc::new(InMemoryBlobStorage::default()),
        );

        upload(&server, "alice", "alice.txt", "skills").await;
        upload(&server, "bob", "bob.txt", "education").await;

        for (user, name) in [("alice", "alice.txt"), ("bob", "bob.txt")] {
            let body = server
                .get("/api/resumes")
                .add_header(header::AUTHORIZATION, bearer(user))
                .await
                .json::<Value>();

            let items = body["data"].as_array().unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0]["ownerId"], user);
            assert_eq!(items[0]["originalFileName"], name);
            assert_eq!(body["meta"]["total"], 1);
        }
    }

    #[tokio::test]
    async fn test_analysis_of_own_resume() {
        let server = server_with(
            Arc::new(InMemoryResumeRepository::default()),
            Arc::new(InMemoryBlobStorage::default()),
        );
        let data = upload(&server, "alice", "cv.txt", FULL_RESUME).await;
        let id = data["id"].as_str().unwrap();

        let response = server
            .get(&format!("/api/resumes/{}/analysis", id))
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .await;

        response.assert_status_ok();
        let analysis = &response.json::<Value>()["data"];
        assert_eq!(analysis["atsScore"], 100);
        assert!(analysis["analyzedAt"].is_string());
    }

    #[tokio::test]
    async fn test_foreign_and_unknown_ids_look_the_same() {
        let server = server_with(
            Arc::new(InMemoryResumeRepository::default()),
            Arc::new(InMemoryBlobStorage::default()),
        );
        let data = upload(&server, "alice", "cv.txt", "skills").await;
        let id = data["id"].as_str().unwrap();

        let foreign = server
            .get(&format!("/api/resumes/{}/analysis", id))
            .add_header(header::AUTHORIZATION, bearer("bob"))
            .await;
        let unknown = server
            .get(&format!("/api/resumes/{}/analysis", uuid::Uuid::now_v7()))
            .add_header(header::AUTHORIZATION, bearer("bob"))
            .await;
        let garbage = server
            .get("/api/resumes/not-a-uuid/analysis")
            .add_header(header::AUTHORIZATION, bearer("bob"))
            .await;

        foreign.assert_status(StatusCode::NOT_FOUND);
        unknown.assert_status(StatusCode::NOT_FOUND);
        garbage.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(foreign.json::<Value>(), unknown.json::<Value>());
        assert_eq!(foreign.json::<Value>(), garbage.json::<Value>());
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let server = server_with(repository.clone(), Arc::new(InMemoryBlobStorage::default()));

        server
            .get("/api/resumes")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/resumes")
            .multipart(resume_form("cv.txt", "skills"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        assert!(repository.all().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let server = server_with(
            Arc::new(FailingResumeRepository),
            Arc::new(InMemoryBlobStorage::default()),
        );

        let list = server
            .get("/api/resumes")
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .await;
        list.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(list.json::<Value>()["message"], "Failed to fetch resumes");

        let upload = server
            .post("/api/resumes")
            .add_header(header::AUTHORIZATION, bearer("alice"))
            .multipart(resume_form("cv.txt", "skills"))
            .await;
        upload.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upload.json::<Value>()["message"], "Upload failed");
    }
}
