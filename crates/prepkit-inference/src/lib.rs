//! # prepkit-inference
//!
//! Remote generative-AI backend for prepkit.
//!
//! This crate provides:
//! - A Gemini-style backend implementing the core file-store and
//!   generation traits over HTTP
//! - The sequential fixed-delay upload retry loop
//! - A scripted mock backend for tests (feature `mock`)
//!
//! The remote service is an opaque text oracle: one file-store upload
//! endpoint and one `generateContent` endpoint. Generation calls are never
//! retried here; only uploads are (transient file-store failures are common,
//! generation failures are surfaced to the caller).

pub mod gemini;
pub mod retry;

// Scripted backend for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use prepkit_core::*;

pub use gemini::GeminiBackend;
pub use retry::upload_with_retry;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockAiBackend;
