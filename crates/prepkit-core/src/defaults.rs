//! Centralized default constants for the prepkit service.
//!
//! **This module is the single source of truth** for all shared default
//! values. The other crates reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3001;

/// Maximum multipart request body size in bytes (32 MB, bounded by the
/// largest lecture-slide PDFs observed in practice).
pub const MAX_BODY_SIZE_BYTES: usize = 32 * 1024 * 1024;

/// Maximum accepted upload size in bytes (25 MB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

// =============================================================================
// REMOTE AI SERVICE
// =============================================================================

/// Default base URL of the Gemini-style generative AI API.
pub const AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model.
pub const GEN_MODEL: &str = "gemini-1.5-flash";

/// Timeout for file-store upload requests (seconds).
pub const UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Maximum file-store upload attempts before giving up.
pub const UPLOAD_MAX_ATTEMPTS: usize = 3;

/// Fixed delay between upload attempts in milliseconds. Not exponential:
/// the file store's transient failures clear within a couple of seconds.
pub const UPLOAD_RETRY_DELAY_MS: u64 = 2000;

// =============================================================================
// QUIZ TEXT CONVENTION
// =============================================================================

/// Maximum options per multiple-choice question; extra lines in the
/// bracket body are discarded.
pub const QUIZ_OPTION_LIMIT: usize = 4;

// =============================================================================
// TEMPORARY ARTIFACTS
// =============================================================================

/// Default directory for raw uploads awaiting re-use.
pub const UPLOAD_DIR: &str = "uploads";

/// Default directory for sidecar files pairing extracted text with a
/// remote file URI.
pub const TEMP_DIR: &str = "temp";

/// Per-command timeout for external text extraction (seconds).
pub const EXTRACTION_CMD_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

/// API key for the remote AI service (required in production).
pub const ENV_AI_API_KEY: &str = "GOOGLE_API_KEY";

/// Override for the AI service base URL.
pub const ENV_AI_BASE_URL: &str = "PREPKIT_AI_BASE_URL";

/// Override for the generation model.
pub const ENV_GEN_MODEL: &str = "PREPKIT_GEN_MODEL";

/// Override for the generation timeout in seconds.
pub const ENV_GEN_TIMEOUT_SECS: &str = "PREPKIT_GEN_TIMEOUT_SECS";

/// Override for the uploads directory.
pub const ENV_UPLOAD_DIR: &str = "PREPKIT_UPLOAD_DIR";

/// Override for the temp directory.
pub const ENV_TEMP_DIR: &str = "PREPKIT_TEMP_DIR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_defaults() {
        assert_eq!(UPLOAD_MAX_ATTEMPTS, 3);
        assert_eq!(UPLOAD_RETRY_DELAY_MS, 2000);
    }

    #[test]
    fn test_option_limit_is_four() {
        // The quiz convention labels options a) through d).
        assert_eq!(QUIZ_OPTION_LIMIT, 4);
    }

    #[test]
    fn test_upload_fits_in_body_limit() {
        assert!((MAX_UPLOAD_BYTES as usize) < MAX_BODY_SIZE_BYTES);
    }
}
