//! Resume upload and ATS analysis.
//!
//! | layer          | role                                                |
//! |----------------|-----------------------------------------------------|
//! | `handlers`     | multipart intake, envelope responses                |
//! | `services`     | validation, text extraction, blob + row writes      |
//! | `analyzer`     | keyword scoring under a `ScoringPolicy`             |
//! | `repositories` | owner-scoped persistence behind `ResumeRepository`   |
//!
//! Every read is scoped to the authenticated owner. A record that belongs to
//! someone else is reported exactly like one that does not exist.

pub mod analyzer;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgResumeRepository;
pub use routes::routes;
pub use services::{ResumeService, ResumeServiceSettings};
