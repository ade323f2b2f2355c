use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Output of scoring one resume. Stored as JSONB alongside the record and
/// returned verbatim by the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Heuristic ATS compatibility score, 0 to 100
    #[schema(minimum = 0, maximum = 100, example = 80)]
    pub ats_score: u32,
    pub strengths: Vec<Strength>,
    pub issues: Vec<Issue>,
    pub interview_questions: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Strength {
    #[schema(example = "Strong skills section")]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    #[schema(example = "Missing education section")]
    pub title: String,
    pub description: String,
    pub suggestion: String,
}
