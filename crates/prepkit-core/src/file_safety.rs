//! Upload safety validation.
//!
//! The service forwards uploads to the remote AI file store as PDFs, so
//! anything that is not recognizably a PDF is rejected before it costs an
//! upload. Filenames are sanitized because uploads are kept on disk under
//! their display name for later re-upload.

use crate::defaults::MAX_UPLOAD_BYTES;

/// Result of upload validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub allowed: bool,
    pub block_reason: Option<String>,
    pub detected_type: Option<String>,
}

impl ValidationResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            block_reason: None,
            detected_type: Some("application/pdf".to_string()),
        }
    }

    pub fn blocked(reason: impl Into<String>, detected: impl Into<String>) -> Self {
        Self {
            allowed: false,
            block_reason: Some(reason.into()),
            detected_type: Some(detected.into()),
        }
    }
}

/// Validate an upload: size cap, then magic-byte check via `infer`.
///
/// Extension claims are not trusted; a PDF without the `%PDF` signature is
/// not a PDF.
pub fn validate_upload(filename: &str, data: &[u8], max_size_bytes: u64) -> ValidationResult {
    if data.is_empty() {
        return ValidationResult::blocked("Uploaded file is empty", "empty");
    }

    if data.len() as u64 > max_size_bytes {
        return ValidationResult::blocked(
            format!("File exceeds maximum size of {} bytes", max_size_bytes),
            "oversized",
        );
    }

    match infer::get(data) {
        Some(kind) if kind.mime_type() == "application/pdf" => ValidationResult::allowed(),
        Some(kind) => ValidationResult::blocked(
            format!("Only PDF uploads are accepted, got {}", kind.mime_type()),
            kind.mime_type().to_string(),
        ),
        None => ValidationResult::blocked(
            format!("File {} is not a recognizable PDF", filename),
            "unknown",
        ),
    }
}

/// Validate with the default size cap.
pub fn validate_upload_default(filename: &str, data: &[u8]) -> ValidationResult {
    validate_upload(filename, data, MAX_UPLOAD_BYTES)
}

/// Sanitize a client-supplied filename for on-disk storage.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return "unnamed_file".to_string();
    }

    // Truncate if too long (preserve extension)
    if sanitized.len() > 255 {
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            let name = &sanitized[..255 - ext.len()];
            return format!("{}{}", name, ext);
        }
        return sanitized[..255].to_string();
    }

    sanitized.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDF_HEADER: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n";

    #[test]
    fn test_pdf_magic_accepted() {
        let result = validate_upload_default("notes.pdf", PDF_HEADER);
        assert!(result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_png_rejected() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let result = validate_upload_default("notes.pdf", &png);
        assert!(!result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_plain_text_rejected_despite_pdf_extension() {
        let result = validate_upload_default("fake.pdf", b"just some text");
        assert!(!result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let result = validate_upload_default("empty.pdf", b"");
        assert!(!result.allowed);
    }

    #[test]
    fn test_oversized_rejected() {
        let result = validate_upload("big.pdf", PDF_HEADER, 4);
        assert!(!result.allowed);
        assert_eq!(result.detected_type.as_deref(), Some("oversized"));
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("dir/sub/notes.pdf"), "notes.pdf");
    }

    #[test]
    fn test_sanitize_replaces_dangerous_characters() {
        assert_eq!(sanitize_filename("a<b>c:d.pdf"), "a_b_c_d.pdf");
        assert_eq!(sanitize_filename("tab\there.pdf"), "tab_here.pdf");
    }

    #[test]
    fn test_sanitize_rejects_dot_names() {
        assert_eq!(sanitize_filename(".."), "unnamed_file");
        assert_eq!(sanitize_filename(""), "unnamed_file");
    }

    #[test]
    fn test_sanitize_truncates_preserving_extension() {
        let long = format!("{}.pdf", "a".repeat(300));
        let out = sanitize_filename(&long);
        assert_eq!(out.len(), 255);
        assert!(out.ends_with(".pdf"));
    }
}
