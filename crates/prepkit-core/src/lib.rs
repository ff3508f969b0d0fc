//! # prepkit-core
//!
//! Core types, traits, and text conventions for the prepkit study-aid
//! service.
//!
//! This crate provides the foundational pieces the other prepkit crates
//! depend on:
//! - Error and result types
//! - Backend traits for the remote AI file store and generation service
//! - The bracket-delimited quiz text convention and its tolerant parser
//! - The cheat-sheet text convention and its renderer
//! - Prompt builders that instruct the model to emit those conventions
//! - Quiz session bookkeeping (attempt counters, struggled-question filter)
//! - Upload safety validation

pub mod cheatsheet;
pub mod defaults;
pub mod error;
pub mod feedback;
pub mod file_safety;
pub mod logging;
pub mod prompts;
pub mod quiz;
pub mod session;
pub mod traits;

// Re-export commonly used types at crate root
pub use cheatsheet::{render_cheatsheet, Bullet, CheatsheetSection, Span, Subsection};
pub use error::{Error, Result};
pub use feedback::{split_feedback_lines, struggled, StruggledQuestion, NO_FEEDBACK_NEEDED};
pub use file_safety::{
    sanitize_filename, validate_upload, validate_upload_default, ValidationResult,
};
pub use quiz::{parse_quiz, parse_quiz_counting, QuizParse, QuizQuestion};
pub use session::{AnswerOutcome, QuizSession, SessionState};
pub use traits::{AiBackend, FileStoreBackend, GenerationBackend, RemoteFileRef};
