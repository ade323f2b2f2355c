use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::RESOURCE_NOT_FOUND;
use crate::features::resumes::analyzer::{analyze, ScoringPolicy};
use crate::features::resumes::dtos::{
    get_extension_from_content_type, ResumeResponseDto, ResumeSummaryDto, ResumeUpload,
};
use crate::features::resumes::models::{AnalysisResult, NewResume};
use crate::features::resumes::repositories::ResumeRepository;
use crate::features::resumes::services::text_extractor::extract_text;
use crate::modules::storage::BlobStorage;

const LIST_FAILED: &str = "Failed to fetch resumes";
const ANALYSIS_FAILED: &str = "Failed to fetch analysis results";

/// Tunables for [`ResumeService`]
#[derive(Debug, Clone)]
pub struct ResumeServiceSettings {
    pub scoring_policy: ScoringPolicy,
    pub max_file_size: usize,
    /// Blob key prefix, e.g. `private/resumes`
    pub key_prefix: String,
}

/// Service for resume upload and retrieval
pub struct ResumeService {
    repository: Arc<dyn ResumeRepository>,
    storage: Arc<dyn BlobStorage>,
    settings: ResumeServiceSettings,
}

impl ResumeService {
    pub fn new(
        repository: Arc<dyn ResumeRepository>,
        storage: Arc<dyn BlobStorage>,
        settings: ResumeServiceSettings,
    ) -> Self {
        Self {
            repository,
            storage,
            settings,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.settings.max_file_size
    }

    /// Validate, analyze and persist one upload for `owner_id`.
    ///
    /// The blob is written first and the row second. If the row cannot be
    /// written the blob is removed again, so a failed upload leaves no record.
    pub async fn upload(&self, owner_id: &str, upload: ResumeUpload) -> Result<ResumeSummaryDto> {
        upload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if upload.size_bytes() > self.settings.max_file_size {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                self.settings.max_file_size,
                self.settings.max_file_size / 1024 / 1024
            )));
        }

        let text = extract_text(&upload.mime_type, &upload.data).await?;
        let analysis = analyze(&text, self.settings.scoring_policy);

        let id = Uuid::now_v7();
        let extension = get_extension_from_content_type(&upload.mime_type).unwrap_or("bin");
        let stored_file_name = format!("{}.{}", id, extension);
        let file_key = build_file_key(&self.settings.key_prefix, owner_id, &stored_file_name);
        let size_bytes = upload.size_bytes() as i64;

        self.storage
            .put(&file_key, upload.data, &upload.mime_type)
            .await
            .map_err(|e| AppError::UploadFailed(e.to_string()))?;

        debug!("Resume blob stored: {}", file_key);

        let new_resume = NewResume {
            id,
            owner_id: owner_id.to_string(),
            stored_file_name,
            original_file_name: upload.original_file_name,
            mime_type: upload.mime_type,
            size_bytes,
            file_key: file_key.clone(),
            analysis,
        };

        let resume = match self.repository.insert(new_resume).await {
            Ok(resume) => resume,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&file_key).await {
                    warn!("Failed to remove orphaned blob '{}': {}", file_key, cleanup);
                }
                return Err(AppError::UploadFailed(e.to_string()));
            }
        };

        info!(
            "Resume saved: id={}, owner={}, size={}, ats_score={}",
            resume.id, resume.owner_id, resume.size_bytes, resume.analysis.ats_score
        );

        Ok(ResumeSummaryDto::from(&resume))
    }

    /// The caller's records, newest first
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeResponseDto>> {
        let resumes = self
            .repository
            .list_by_owner(owner_id)
            .await
            .map_err(|e| AppError::FetchFailed {
                message: LIST_FAILED,
                detail: e.to_string(),
            })?;

        Ok(resumes.into_iter().map(ResumeResponseDto::from).collect())
    }

    /// Analysis of one record. Unknown ids and other owners' ids are
    /// indistinguishable: both are `NotFound`.
    pub async fn get_analysis(&self, owner_id: &str, id: Uuid) -> Result<AnalysisResult> {
        let resume = self
            .repository
            .find_by_id_and_owner(id, owner_id)
            .await
            .map_err(|e| AppError::FetchFailed {
                message: ANALYSIS_FAILED,
                detail: e.to_string(),
            })?
            .ok_or_else(|| AppError::NotFound(RESOURCE_NOT_FOUND.to_string()))?;

        Ok(resume.analysis.0)
    }
}

fn build_file_key(prefix: &str, owner_id: &str, stored_file_name: &str) -> String {
    if prefix.is_empty() {
        format!("{}/{}", owner_id, stored_file_name)
    } else {
        format!("{}/{}/{}", prefix, owner_id, stored_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        FailingBlobStorage, FailingResumeRepository, InMemoryBlobStorage, InMemoryResumeRepository,
    };

    const FULL_RESUME: &str = "skills, experience, education, achievements, \u{2022} bullet, managed project with team, led effort";

    fn settings() -> ResumeServiceSettings {
        ResumeServiceSettings {
            scoring_policy: ScoringPolicy::Extended,
            max_file_size: 1024,
            key_prefix: "private/resumes".to_string(),
        }
    }

    fn service() -> (
        ResumeService,
        Arc<InMemoryResumeRepository>,
        Arc<InMemoryBlobStorage>,
    ) {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let storage = Arc::new(InMemoryBlobStorage::default());
        let service = ResumeService::new(repository.clone(), storage.clone(), settings());
        (service, repository, storage)
    }

    fn text_upload(name: &str, text: &str) -> ResumeUpload {
        ResumeUpload::new(name, "text/plain", text.as_bytes().to_vec())
    }

    #[test]
    fn test_build_file_key() {
        assert_eq!(
            build_file_key("private/resumes", "user-1", "abc.pdf"),
            "private/resumes/user-1/abc.pdf"
        );
        assert_eq!(build_file_key("", "user-1", "abc.pdf"), "user-1/abc.pdf");
    }

    #[tokio::test]
    async fn test_upload_persists_record_and_blob() {
        let (service, repository, storage) = service();

        let summary = service
            .upload("user-1", text_upload("cv.txt", FULL_RESUME))
            .await
            .unwrap();

        assert_eq!(summary.original_file_name, "cv.txt");
        assert_eq!(summary.stored_file_name, format!("{}.txt", summary.id));

        let records = repository.all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner_id, "user-1");
        assert_eq!(records[0].mime_type, "text/plain");
        assert_eq!(records[0].size_bytes, FULL_RESUME.len() as i64);
        assert_eq!(records[0].analysis.ats_score, 100);

        let expected_key = format!("private/resumes/user-1/{}.txt", summary.id);
        assert_eq!(records[0].file_key, expected_key);
        assert!(storage.contains(&expected_key));
    }

    #[tokio::test]
    async fn test_upload_validation_happens_before_storage() {
        let (service, repository, storage) = service();

        let empty = ResumeUpload::new("cv.txt", "text/plain", Vec::new());
        assert!(matches!(
            service.upload("user-1", empty).await,
            Err(AppError::Validation(_))
        ));

        let image = ResumeUpload::new("cv.png", "image/png", vec![1, 2, 3]);
        assert!(matches!(
            service.upload("user-1", image).await,
            Err(AppError::Validation(_))
        ));

        let too_big = ResumeUpload::new("cv.txt", "text/plain", vec![b'a'; 2048]);
        assert!(matches!(
            service.upload("user-1", too_big).await,
            Err(AppError::Validation(_))
        ));

        assert!(repository.all().is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_word_file_persists_nothing() {
        let (service, repository, storage) = service();

        let doc = ResumeUpload::new(
            "cv.doc",
            "application/msword",
            b"\xD0\xCF\x11\xE0skills".to_vec(),
        );
        assert!(matches!(
            service.upload("user-1", doc).await,
            Err(AppError::Validation(_))
        ));

        assert!(repository.all().is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_upload_failed() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let service = ResumeService::new(
            repository.clone(),
            Arc::new(FailingBlobStorage),
            settings(),
        );

        let result = service.upload("user-1", text_upload("cv.txt", "skills")).await;

        assert!(matches!(result, Err(AppError::UploadFailed(_))));
        assert!(repository.all().is_empty());
    }

    #[tokio::test]
    async fn test_insert_failure_removes_blob() {
        let storage = Arc::new(InMemoryBlobStorage::default());
        let service = ResumeService::new(
            Arc::new(FailingResumeRepository),
            storage.clone(),
            settings(),
        );

        let result = service.upload("user-1", text_upload("cv.txt", "skills")).await;

        assert!(matches!(result, Err(AppError::UploadFailed(_))));
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_read_failures_are_fetch_failed() {
        let service = ResumeService::new(
            Arc::new(FailingResumeRepository),
            Arc::new(InMemoryBlobStorage::default()),
            settings(),
        );

        assert!(matches!(
            service.list_by_owner("user-1").await,
            Err(AppError::FetchFailed {
                message: LIST_FAILED,
                ..
            })
        ));
        assert!(matches!(
            service.get_analysis("user-1", Uuid::now_v7()).await,
            Err(AppError::FetchFailed {
                message: ANALYSIS_FAILED,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_owner_and_newest_first() {
        let (service, _, _) = service();

        let first = service
            .upload("alice", text_upload("a1.txt", "skills"))
            .await
            .unwrap();
        service
            .upload("bob", text_upload("b1.txt", "education"))
            .await
            .unwrap();
        let second = service
            .upload("alice", text_upload("a2.txt", "career"))
            .await
            .unwrap();

        let alice = service.list_by_owner("alice").await.unwrap();
        let ids: Vec<Uuid> = alice.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(alice.iter().all(|r| r.owner_id == "alice"));

        let bob = service.list_by_owner("bob").await.unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].original_file_name, "b1.txt");

        assert!(service.list_by_owner("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_analysis_hides_foreign_records() {
        let (service, _, _) = service();

        let summary = service
            .upload("alice", text_upload("cv.txt", FULL_RESUME))
            .await
            .unwrap();

        let analysis = service.get_analysis("alice", summary.id).await.unwrap();
        assert_eq!(analysis.ats_score, 100);

        let foreign = service.get_analysis("bob", summary.id).await.unwrap_err();
        let missing = service
            .get_analysis("alice", Uuid::now_v7())
            .await
            .unwrap_err();

        match (foreign, missing) {
            (AppError::NotFound(a), AppError::NotFound(b)) => assert_eq!(a, b),
            other => panic!("expected two NotFound errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scoring_policy_is_applied() {
        let repository = Arc::new(InMemoryResumeRepository::default());
        let service = ResumeService::new(
            repository.clone(),
            Arc::new(InMemoryBlobStorage::default()),
            ResumeServiceSettings {
                scoring_policy: ScoringPolicy::Basic,
                ..settings()
            },
        );

        service
            .upload("user-1", text_upload("cv.txt", ""))
            .await
            .unwrap_err();
        let summary = service
            .upload("user-1", text_upload("cv.txt", "nothing relevant"))
            .await
            .unwrap();

        let analysis = service.get_analysis("user-1", summary.id).await.unwrap();
        assert_eq!(analysis.issues.len(), 4);
        assert!(analysis.interview_questions.is_empty());
    }
}
