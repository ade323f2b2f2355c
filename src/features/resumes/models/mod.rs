mod analysis;
mod resume;

pub use analysis::{AnalysisResult, Issue, Strength};
pub use resume::{NewResume, Resume};
