//! Input acquisition: turns an uploaded PDF or text file into résumé text.

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;

/// Extracted text must be longer than this (after trimming) to be analyzed.
pub const MIN_RESUME_CHARS: usize = 50;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Picks the document kind from the declared content type, then the file extension.
    pub fn detect(filename: Option<&str>, content_type: Option<&str>) -> Result<Self, AppError> {
        let content_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        match content_type.as_deref() {
            Some("application/pdf") => return Ok(DocumentKind::Pdf),
            Some("text/plain") => return Ok(DocumentKind::PlainText),
            _ => {}
        }

        let extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(AppError::Validation(
                "Unsupported file type. Upload a PDF or TXT file".to_string(),
            )),
        }
    }
}

/// An uploaded résumé file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Extracts and checks the résumé text of an upload.
pub async fn extract_resume_text(file: UploadedFile) -> Result<String, AppError> {
    if file.data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    let kind = DocumentKind::detect(file.filename.as_deref(), file.content_type.as_deref())?;

    let text = match kind {
        DocumentKind::Pdf => {
            let data = file.data;
            // pdf-extract is CPU-bound and may panic on broken files.
            tokio::task::spawn_blocking(move || extract_pdf_text(&data))
                .await
                .map_err(|e| {
                    warn!("PDF extraction task failed: {e}");
                    AppError::Validation("Could not read the PDF file".to_string())
                })??
        }
        DocumentKind::PlainText => decode_text(&file.data)?,
    };

    info!(
        "Extracted {} characters from {:?} upload",
        text.chars().count(),
        kind
    );
    ensure_min_length(text)
}

fn extract_pdf_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data).map_err(|e| {
        warn!("PDF extraction error: {e}");
        AppError::Validation("Could not read the PDF file".to_string())
    })?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from the PDF".to_string(),
        ));
    }
    Ok(text)
}

fn decode_text(data: &[u8]) -> Result<String, AppError> {
    String::from_utf8(data.to_vec())
        .map_err(|_| AppError::Validation("Text file must be UTF-8 encoded".to_string()))
}

fn ensure_min_length(text: String) -> Result<String, AppError> {
    if text.trim().chars().count() <= MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "File is too short or empty".to_string(),
        ));
    }
    Ok(text)
}
