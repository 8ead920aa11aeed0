use std::{fs, path::Path};

use base64::{engine::general_purpose, Engine as _};

use super::Attachment;
use crate::errors::Result;

/// Reads `path` and embeds it as a `data:<mime>;base64,...` URL.
///
/// No size limit is applied; read failures surface as I/O errors.
pub fn encode_file(path: &Path) -> Result<Attachment> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();
    tracing::debug!(file = %path.display(), bytes = bytes.len(), "encoded attachment");
    Ok(Attachment {
        data: data_url(mime_for(path), &bytes),
        name,
    })
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
