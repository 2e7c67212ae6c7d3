//! Rubric document text extraction.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default backend is
//! `DocumentExtractor` (pdf-extract for PDF, docx-rs for Word).

pub mod docx;
pub mod pdf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Could not read {format} document: {reason}")]
    Unreadable {
        format: RubricFormat,
        reason: String,
    },

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Rubric formats the grader can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricFormat {
    Pdf,
    Docx,
}

impl RubricFormat {
    /// Resolves a MIME type, ignoring case and parameters such as `; charset=...`.
    pub fn from_mime(mime_type: &str) -> Result<Self, ExtractError> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Ok(RubricFormat::Pdf),
            DOCX_MIME => Ok(RubricFormat::Docx),
            _ => Err(ExtractError::UnsupportedFileType(mime_type.to_string())),
        }
    }
}

impl std::fmt::Display for RubricFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RubricFormat::Pdf => f.write_str("PDF"),
            RubricFormat::Docx => f.write_str("Word"),
        }
    }
}

/// Turns an uploaded rubric into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes, mime_type: &str) -> Result<String, ExtractError>;
}

/// Default extractor. Parsing runs on the blocking pool.
pub struct DocumentExtractor;

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract_text(&self, bytes: Bytes, mime_type: &str) -> Result<String, ExtractError> {
        let format = RubricFormat::from_mime(mime_type)?;
        debug!("Extracting {} rubric ({} bytes)", format, bytes.len());

        tokio::task::spawn_blocking(move || match format {
            RubricFormat::Pdf => pdf::extract_text(&bytes),
            RubricFormat::Docx => docx::extract_text(&bytes),
        })
        .await?
    }
}
