//! Backend traits for the remote AI collaborator.
//!
//! The remote service is treated as an opaque text oracle: it stores files,
//! accepts a file reference plus a text prompt, and returns free-form text
//! with no guaranteed output schema. These traits keep the HTTP handlers
//! testable against a scripted mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reference to a file held by the remote AI file store.
///
/// The local system keeps only this reference after upload completes; the
/// content itself lives with the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteFileRef {
    /// Remote URI identifying the stored file.
    pub uri: String,
    /// MIME type recorded at upload time.
    pub mime_type: String,
    /// Human-readable name shown in the remote console.
    pub display_name: String,
}

/// Backend for the remote file store.
#[async_trait]
pub trait FileStoreBackend: Send + Sync {
    /// Upload file data, returning the remote reference.
    ///
    /// A single attempt; callers wanting resilience wrap this in the
    /// upload retry loop.
    async fn upload_file(
        &self,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFileRef>;
}

/// Backend for text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate from a plain text prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate from a stored file plus a text prompt.
    async fn generate_with_file(&self, file: &RemoteFileRef, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Combined backend as the HTTP layer consumes it.
#[async_trait]
pub trait AiBackend: FileStoreBackend + GenerationBackend {
    /// Check if the remote service is reachable.
    async fn health_check(&self) -> Result<bool>;
}
