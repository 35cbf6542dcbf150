//! Resume text extraction for uploaded files.

use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns true when the upload should go through the PDF extractor.
pub fn is_pdf(content_type: Option<&str>, data: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.trim().eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    declared || data.starts_with(PDF_MAGIC)
}

/// Extracts plain text from an uploaded resume.
///
/// PDFs go through `pdf-extract`; anything else is decoded as UTF-8, replacing invalid bytes.
/// CPU-bound for PDFs: call from a blocking task.
pub fn extract_resume_text(content_type: Option<&str>, data: &[u8]) -> Result<String, AppError> {
    if is_pdf(content_type, data) {
        let text = pdf_extract::extract_text_from_mem(data).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read text from PDF: {e:?}"))
        })?;
        debug!(bytes = data.len(), chars = text.len(), "Extracted text from PDF upload");
        Ok(text)
    } else {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}
