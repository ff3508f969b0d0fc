//! Scripted mock backend for deterministic testing.
//!
//! Implements the same traits as the real backend with canned responses,
//! injectable failures, and a call log for assertions.
//!
//! ## Usage
//!
//! ```rust
//! use prepkit_inference::mock::MockAiBackend;
//! use prepkit_core::GenerationBackend;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = MockAiBackend::new()
//!     .with_response("{Q?}[a) 1\nb) 2]\n(a)")
//!     .with_upload_failures(2);
//!
//! let text = backend.generate("any prompt").await.unwrap();
//! assert!(text.starts_with('{'));
//! # }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use prepkit_core::{
    AiBackend, Error, FileStoreBackend, GenerationBackend, RemoteFileRef, Result,
};

/// One logged backend invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

#[derive(Debug, Default)]
struct MockState {
    /// (needle, response) pairs; first needle contained in the prompt wins.
    response_mappings: Vec<(String, String)>,
    default_response: String,
    upload_failures_remaining: usize,
    generation_fails: bool,
    upload_count: usize,
    calls: Vec<MockCall>,
}

/// Mock AI backend for testing.
#[derive(Clone)]
pub struct MockAiBackend {
    state: Arc<Mutex<MockState>>,
    model: String,
}

impl MockAiBackend {
    /// Create a mock with an empty default response.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                default_response: "Mock response".to_string(),
                ..MockState::default()
            })),
            model: "mock-model".to_string(),
        }
    }

    /// Set the response returned for generation requests.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.state.lock().unwrap().default_response = response.into();
        self
    }

    /// Map prompts containing `needle` to a specific response. Mappings are
    /// checked in insertion order before the default response.
    pub fn with_response_mapping(
        self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .response_mappings
            .push((needle.into(), response.into()));
        self
    }

    /// Make the first `n` upload calls fail.
    pub fn with_upload_failures(self, n: usize) -> Self {
        self.state.lock().unwrap().upload_failures_remaining = n;
        self
    }

    /// Make every generation call fail.
    pub fn with_generation_failure(self) -> Self {
        self.state.lock().unwrap().generation_fails = true;
        self
    }

    /// All logged calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of upload calls observed (including failed ones).
    pub fn upload_call_count(&self) -> usize {
        self.count_ops("upload_file")
    }

    /// Number of generation calls observed.
    pub fn generation_call_count(&self) -> usize {
        self.count_ops("generate") + self.count_ops("generate_with_file")
    }

    fn count_ops(&self, op: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == op)
            .count()
    }

    fn respond(&self, operation: &str, prompt: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            operation: operation.to_string(),
            input: prompt.to_string(),
        });

        if state.generation_fails {
            return Err(Error::Generation("injected generation failure".to_string()));
        }

        let mapped = state
            .response_mappings
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
            .map(|(_, response)| response.clone());
        Ok(mapped.unwrap_or_else(|| state.default_response.clone()))
    }
}

impl Default for MockAiBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStoreBackend for MockAiBackend {
    async fn upload_file(
        &self,
        _data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFileRef> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            operation: "upload_file".to_string(),
            input: display_name.to_string(),
        });

        if state.upload_failures_remaining > 0 {
            state.upload_failures_remaining -= 1;
            return Err(Error::Upload("injected upload failure".to_string()));
        }

        state.upload_count += 1;
        Ok(RemoteFileRef {
            uri: format!("https://files.mock/files/{}", state.upload_count),
            mime_type: mime_type.to_string(),
            display_name: display_name.to_string(),
        })
    }
}

#[async_trait]
impl GenerationBackend for MockAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.respond("generate", prompt)
    }

    async fn generate_with_file(&self, _file: &RemoteFileRef, prompt: &str) -> Result<String> {
        self.respond("generate_with_file", prompt)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AiBackend for MockAiBackend {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let backend = MockAiBackend::new();
        assert_eq!(backend.generate("anything").await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn test_response_mapping_by_substring() {
        let backend = MockAiBackend::new()
            .with_response("default")
            .with_response_mapping("cheat sheet", "{Title}\n- point");

        let hit = backend.generate("Please create a cheat sheet").await.unwrap();
        assert_eq!(hit, "{Title}\n- point");

        let miss = backend.generate("something else").await.unwrap();
        assert_eq!(miss, "default");
    }

    #[tokio::test]
    async fn test_upload_failure_injection_is_consumed() {
        let backend = MockAiBackend::new().with_upload_failures(1);
        assert!(backend.upload_file(b"x", "application/pdf", "a.pdf").await.is_err());
        assert!(backend.upload_file(b"x", "application/pdf", "a.pdf").await.is_ok());
        assert_eq!(backend.upload_call_count(), 2);
    }

    #[tokio::test]
    async fn test_generation_failure_injection() {
        let backend = MockAiBackend::new().with_generation_failure();
        let err = backend.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_call_log_records_inputs() {
        let backend = MockAiBackend::new();
        backend.generate("first prompt").await.unwrap();
        let file = backend
            .upload_file(b"x", "application/pdf", "notes.pdf")
            .await
            .unwrap();
        backend.generate_with_file(&file, "second prompt").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].operation, "generate");
        assert_eq!(calls[0].input, "first prompt");
        assert_eq!(calls[1].operation, "upload_file");
        assert_eq!(calls[2].operation, "generate_with_file");
        assert_eq!(backend.generation_call_count(), 2);
    }

    #[tokio::test]
    async fn test_upload_uris_are_distinct() {
        let backend = MockAiBackend::new();
        let a = backend.upload_file(b"x", "application/pdf", "a.pdf").await.unwrap();
        let b = backend.upload_file(b"x", "application/pdf", "b.pdf").await.unwrap();
        assert_ne!(a.uri, b.uri);
    }
}
