//! Structured logging schema and field name constants for prepkit.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed, requires operator attention |
//! | WARN  | Recoverable issue (failed upload attempt, missing temp file) |
//! | INFO  | Lifecycle events (startup, upload outcomes), operation completions |
//! | DEBUG | Decision points, intermediate values, parse diagnostics |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "inference", "core"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gemini", "upload_retry", "artifact_store", "quiz_parser"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "upload_file", "generate", "cleanup"
pub const OPERATION: &str = "op";

// ─── Retry fields ──────────────────────────────────────────────────────────

/// Current attempt number (1-based).
pub const ATTEMPT: &str = "attempt";

/// Configured attempt budget.
pub const MAX_ATTEMPTS: &str = "max_attempts";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt sent to the model.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Byte size of an uploaded file.
pub const FILE_SIZE: &str = "file_size";

// ─── Parse diagnostics ─────────────────────────────────────────────────────

/// Number of questions recovered from a model reply.
pub const QUESTION_COUNT: &str = "question_count";

/// Number of question segments silently dropped by the tolerant parser.
pub const DROPPED_SEGMENTS: &str = "dropped_segments";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Sanitized display name of an uploaded file.
pub const FILE_NAME: &str = "file_name";

/// Model name used for generation.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
