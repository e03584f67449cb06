//! Upload Routes
//!
//! The PDF Genie pipeline: validate → extract → generate → respond.
//!
//! Endpoints:
//! - POST /upload - multipart form with a `file` field holding the PDF

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::extract;
use crate::state::AppState;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Name of the multipart field carrying the document
const FILE_FIELD: &str = "file";

const INSUFFICIENT_TEXT_MESSAGE: &str = "Hmm, this PDF seems to be mostly images or has very little text. 🤔 PDF Genie works best with text-heavy documents!";

const MIB: usize = 1024 * 1024;

// ============================================================================
// Types
// ============================================================================

/// A file taken from the multipart body
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

/// Body of every 200 response from `POST /upload`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Explained {
        success: bool,
        explanation: String,
        /// Characters of trimmed extracted text
        original_length: usize,
        filename: Option<String>,
    },
    /// Not enough text to bother the model with (scanned or image-only PDFs)
    InsufficientText { success: bool, message: String },
}

impl UploadResponse {
    pub fn explained(explanation: String, original_length: usize, filename: Option<String>) -> Self {
        Self::Explained {
            success: true,
            explanation,
            original_length,
            filename,
        }
    }

    pub fn insufficient_text() -> Self {
        Self::InsufficientText {
            success: false,
            message: INSUFFICIENT_TEXT_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

/// Create the upload router
pub fn router(limits: &UploadConfig) -> Router<AppState> {
    Router::new()
        .route("/", post(upload_pdf))
        .layer(DefaultBodyLimit::max(limits.request_body_limit()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload
///
/// Turn an uploaded PDF into a meme-style explanation.
async fn upload_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let limits = &state.config().upload;

    // Refuse obviously oversized bodies before reading them
    if let Some(declared) = declared_content_length(&headers) {
        if declared > limits.request_body_limit() {
            return Err(file_too_large(limits.max_upload_bytes));
        }
    }

    let mut multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart upload: {}", e.body_text())))?;

    let upload = read_pdf_field(&mut multipart, limits.max_upload_bytes).await?;

    tracing::info!(
        filename = ?upload.filename,
        content_type = %upload.content_type,
        size = upload.data.len(),
        "Received PDF upload"
    );

    let text = extract::extract_text_blocking(upload.data.to_vec()).await?;
    let text_chars = text.chars().count();

    if !has_enough_text(&text, limits.min_text_chars) {
        tracing::info!(
            filename = ?upload.filename,
            text_chars,
            min_text_chars = limits.min_text_chars,
            "Not enough text extracted, skipping generation"
        );
        return Ok(Json(UploadResponse::insufficient_text()));
    }

    let explanation = state
        .generator()
        .generate_explanation(&text, &state.config().generation)
        .await?;

    tracing::info!(
        filename = ?upload.filename,
        text_chars,
        explanation_chars = explanation.chars().count(),
        "Explanation generated"
    );

    Ok(Json(UploadResponse::explained(
        explanation,
        text_chars,
        upload.filename,
    )))
}

// ============================================================================
// Helpers
// ============================================================================

/// Find the `file` field, check its type and size, and buffer it
async fn read_pdf_field(multipart: &mut Multipart, max_bytes: usize) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() == Some(FILE_FIELD) {
            return read_file(field, max_bytes).await;
        }
    }

    Err(AppError::BadRequest(
        "No file uploaded. Please attach a PDF in the 'file' field. 📄".to_string(),
    ))
}

async fn read_file(field: Field<'_>, max_bytes: usize) -> Result<UploadedFile> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !is_pdf_content_type(&content_type) {
        return Err(AppError::BadRequest(
            "Invalid file type. Please upload a PDF file. 📄".to_string(),
        ));
    }

    let filename = field.file_name().map(str::to_string);
    let data = field
        .bytes()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?;

    if data.len() > max_bytes {
        return Err(file_too_large(max_bytes));
    }

    Ok(UploadedFile {
        filename,
        content_type,
        data,
    })
}

/// Exact match only; no parameters, no case folding
fn is_pdf_content_type(content_type: &str) -> bool {
    content_type == PDF_MIME_TYPE
}

/// Sufficiency check: enough trimmed characters to be worth generating from
fn has_enough_text(text: &str, min_chars: usize) -> bool {
    !text.is_empty() && text.trim().chars().count() >= min_chars
}

fn declared_content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        file_too_large(max_bytes)
    } else {
        AppError::BadRequest(format!("Invalid multipart upload: {}", err.body_text()))
    }
}

fn file_too_large(max_bytes: usize) -> AppError {
    AppError::BadRequest(format!(
        "File too large. Please upload a PDF smaller than {}. 🚫",
        size_label(max_bytes)
    ))
}

fn size_label(bytes: usize) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
