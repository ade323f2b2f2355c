use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::resumes::{dtos as resumes_dtos, handlers as resumes_handlers, models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Resumes
        resumes_handlers::upload_resume,
        resumes_handlers::upload_resume_legacy,
        resumes_handlers::list_resumes,
        resumes_handlers::get_resume_analysis,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Resumes
            resumes_dtos::UploadResumeDto,
            resumes_dtos::ResumeSummaryDto,
            resumes_dtos::ResumeResponseDto,
            models::AnalysisResult,
            models::Strength,
            models::Issue,
            ApiResponse<resumes_dtos::ResumeSummaryDto>,
            ApiResponse<Vec<resumes_dtos::ResumeResponseDto>>,
            ApiResponse<models::AnalysisResult>,
        )
    ),
    tags(
        (name = "resumes", description = "Resume upload and ATS analysis"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Interview Prep API",
        version = "0.1.0",
        description = "API documentation for the interview preparation backend",
    )
)]
pub struct ApiDoc;

/// Adds the Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
