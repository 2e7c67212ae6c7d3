use crate::documents::{ExtractError, RubricFormat};

/// Extracts the text of every page, pages separated by form feeds as
/// pdf-extract emits them.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(pdf_bytes).map_err(|e| ExtractError::Unreadable {
        format: RubricFormat::Pdf,
        reason: e.to_string(),
    })
}
