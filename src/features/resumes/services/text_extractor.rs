//! Turns uploaded bytes into text the analyzer can scan.

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::fmt::Display;
use tracing::{debug, warn};

use crate::core::error::{AppError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOC_MIME: &str = "application/msword";

/// Extract the text content of an upload.
///
/// PDF and DOCX documents are parsed on the blocking pool. Legacy binary
/// `.doc` files cannot be read and are rejected. Plain text and Markdown are
/// decoded as UTF-8, replacing invalid sequences.
pub async fn extract_text(mime_type: &str, data: &[u8]) -> Result<String> {
    match mime_type {
        PDF_MIME => extract_blocking("PDF", data, pdf_extract::extract_text_from_mem).await,
        DOCX_MIME => extract_blocking("DOCX", data, docx_text).await,
        DOC_MIME => {
            debug!("Rejected legacy .doc upload");
            Err(unreadable_file())
        }
        _ => Ok(decode_lossy(data)),
    }
}

async fn extract_blocking<E>(
    format: &'static str,
    data: &[u8],
    parse: fn(&[u8]) -> std::result::Result<String, E>,
) -> Result<String>
where
    E: Display + Send + 'static,
{
    let bytes = data.to_vec();
    let extracted = tokio::task::spawn_blocking(move || parse(&bytes)).await;

    match extracted {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            debug!("Failed to extract text from {}: {}", format, e);
            Err(unreadable_file())
        }
        // Both parsers panic on some malformed documents
        Err(e) if e.is_panic() => {
            warn!("{} parser panicked on upload", format);
            Err(unreadable_file())
        }
        Err(e) => Err(AppError::Internal(format!(
            "{} extraction task failed: {}",
            format, e
        ))),
    }
}

/// Top-level paragraph text of a DOCX body, one line per paragraph
fn docx_text(data: &[u8]) -> std::result::Result<String, String> {
    let docx = docx_rs::read_docx(data).map_err(|e| e.to_string())?;
    let mut text = String::new();

    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            push_paragraph(&mut text, paragraph);
        }
    }

    Ok(text)
}

fn push_paragraph(out: &mut String, paragraph: &Paragraph) {
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    out.push_str(&t.text);
                }
            }
        }
    }
    out.push('\n');
}

fn unreadable_file() -> AppError {
    AppError::Validation("Unable to read text from the uploaded file".to_string())
}

fn decode_lossy(data: &[u8]) -> String {
    // Strip a UTF-8 BOM so it does not end up in the first keyword
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::resumes::analyzer::{analyze, ScoringPolicy};
    use docx_rs::{Docx, Run};
    use std::io::Cursor;

    fn docx_fixture(lines: &[&str]) -> Vec<u8> {
        let mut doc = Docx::new();
        for line in lines {
            doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut buf = Cursor::new(Vec::new());
        doc.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[tokio::test]
    async fn test_plain_text_passthrough() {
        let text = extract_text("text/plain", "Skills\n\u{2022} Rust".as_bytes())
            .await
            .unwrap();
        assert_eq!(text, "Skills\n\u{2022} Rust");
    }

    #[tokio::test]
    async fn test_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"education");
        let text = extract_text("text/markdown", &bytes).await.unwrap();
        assert_eq!(text, "education");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let text = extract_text("text/plain", &[b's', 0xFF, b'k'])
            .await
            .unwrap();
        assert_eq!(text, "s\u{FFFD}k");
    }

    #[tokio::test]
    async fn test_broken_pdf_is_a_validation_error() {
        let result = extract_text(PDF_MIME, b"definitely not a pdf").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_docx_paragraphs_are_extracted() {
        let bytes = docx_fixture(&["Technical Skills", "Professional Experience"]);
        assert!(bytes.starts_with(b"PK"));

        let text = extract_text(DOCX_MIME, &bytes).await.unwrap();
        assert!(text.contains("Technical Skills\n"));
        assert!(text.contains("Professional Experience\n"));
    }

    #[tokio::test]
    async fn test_docx_resume_sections_are_detected() {
        let bytes = docx_fixture(&[
            "Technical Skills",
            "Professional Experience",
            "\u{2022} Managed a team project",
            "Education: University",
            "Achievements and awards",
        ]);

        let text = extract_text(DOCX_MIME, &bytes).await.unwrap();
        let result = analyze(&text, ScoringPolicy::Extended);

        assert_eq!(result.ats_score, 100);
        assert!(result.issues.is_empty());
        assert!(result
            .strengths
            .iter()
            .any(|s| s.title == "Strong skills section"));
    }

    #[tokio::test]
    async fn test_broken_docx_is_a_validation_error() {
        let result = extract_text(DOCX_MIME, b"PK\x03\x04 not really a zip").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_legacy_doc_is_rejected() {
        let result = extract_text(DOC_MIME, b"\xD0\xCF\x11\xE0skills").await;
        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Unable to read text from the uploaded file")
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }
}
