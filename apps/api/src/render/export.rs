use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::errors::AppError;

/// A standalone HTML file ready to be saved by the browser.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub body: Bytes,
}

/// Packages already-rendered markup as `<name>.html`.
///
/// The markup is copied, never modified. Failures are reported instead of
/// producing an empty or unnamed download.
pub fn export_document(markup: &str, suggested_file_name: &str) -> Result<ExportArtifact, AppError> {
    if markup.trim().is_empty() {
        return Err(AppError::Export("there is no rendered content to export".to_string()));
    }

    let stem = sanitize_file_stem(suggested_file_name);
    if stem.is_empty() {
        return Err(AppError::Export(format!(
            "'{suggested_file_name}' is not a usable file name"
        )));
    }

    Ok(ExportArtifact {
        file_name: format!("{stem}.html"),
        body: Bytes::copy_from_slice(markup.as_bytes()),
    })
}

/// Whitespace runs become `-`; anything outside `[A-Za-z0-9._-]` is dropped.
fn sanitize_file_stem(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw
        .strip_suffix(".html")
        .or_else(|| raw.strip_suffix(".HTML"))
        .unwrap_or(raw);

    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_dash = !out.is_empty();
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.push(c);
        }
    }
    out.trim_matches('.').to_string()
}

impl IntoResponse for ExportArtifact {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}
