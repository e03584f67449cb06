use mupdf::Document;

use super::ExtractError;

/// Readers accept a few junk bytes before the header; so do we
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Check for a `%PDF` marker within the first kilobyte
pub fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(4).any(|w| w == b"%PDF")
}

/// Extract the text of every page, in page order.
///
/// Each page's text is followed by a newline; the joined result is trimmed.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !has_pdf_header(bytes) {
        return Err(ExtractError::NotPdf);
    }

    let doc = Document::from_bytes(bytes, "application/pdf")?;
    let page_count = doc.page_count()?;

    let mut text = String::new();
    for index in 0..page_count {
        let page_error = move |e: mupdf::Error| ExtractError::Page {
            page: index as usize + 1,
            reason: e.to_string(),
        };

        let page = doc.load_page(index).map_err(page_error)?;
        let page_text = page.to_text().map_err(page_error)?;

        text.push_str(&page_text);
        text.push('\n');
    }

    tracing::debug!(
        pages = page_count,
        bytes = text.len(),
        "Extracted PDF text"
    );

    Ok(text.trim().to_string())
}

/// Run [`extract_text`] on the blocking thread pool.
///
/// MuPDF work is CPU-bound and must not stall the async runtime.
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))?
}
