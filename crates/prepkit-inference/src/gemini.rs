//! Gemini-style generative AI backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use prepkit_core::defaults::{
    AI_BASE_URL, ENV_AI_API_KEY, ENV_AI_BASE_URL, ENV_GEN_MODEL, ENV_GEN_TIMEOUT_SECS,
    GEN_MODEL, GEN_TIMEOUT_SECS, UPLOAD_TIMEOUT_SECS,
};
use prepkit_core::{
    AiBackend, Error, FileStoreBackend, GenerationBackend, RemoteFileRef, Result,
};

/// Backend for a Gemini-style generative AI API: a file store plus a
/// `generateContent` endpoint, both authenticated by API key.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    upload_timeout_secs: u64,
    gen_timeout_secs: u64,
}

impl GeminiBackend {
    /// Create a backend against the default API endpoint and model.
    pub fn new(api_key: String) -> Self {
        Self::with_config(AI_BASE_URL.to_string(), api_key, GEN_MODEL.to_string())
    }

    /// Create a backend with custom endpoint and model.
    pub fn with_config(base_url: String, api_key: String, model: String) -> Self {
        let gen_timeout = std::env::var(ENV_GEN_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        info!(
            "Initializing AI backend: url={}, model={}",
            base_url, model
        );

        Self {
            client: Client::new(),
            base_url,
            api_key,
            model,
            upload_timeout_secs: UPLOAD_TIMEOUT_SECS,
            gen_timeout_secs: gen_timeout,
        }
    }

    /// Create from environment variables. The API key is required; base URL
    /// and model fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_AI_API_KEY)
            .map_err(|_| Error::Config(format!("{} is not set", ENV_AI_API_KEY)))?;
        let base_url =
            std::env::var(ENV_AI_BASE_URL).unwrap_or_else(|_| AI_BASE_URL.to_string());
        let model = std::env::var(ENV_GEN_MODEL).unwrap_or_else(|_| GEN_MODEL.to_string());

        Ok(Self::with_config(base_url, api_key, model))
    }

    /// Internal generation method shared by both generate variants.
    async fn generate_internal(&self, parts: Vec<Part>) -> Result<String> {
        let start = Instant::now();
        let request = GenerateRequest {
            contents: vec![Content { parts }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(url)
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "AI service returned {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse response: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| Error::Generation("No candidates in response".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = text.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30000 {
            warn!(duration_ms = elapsed, slow = true, "Slow generation operation");
        }
        Ok(text)
    }
}

/// Multipart upload metadata wrapper.
#[derive(Serialize)]
struct UploadMetadata<'a> {
    file: UploadMetadataFile<'a>,
}

#[derive(Serialize)]
struct UploadMetadataFile<'a> {
    display_name: &'a str,
}

/// Response from the file-store upload endpoint.
#[derive(Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    uri: String,
    mime_type: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Request payload for `generateContent`.
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// One content part: either a stored-file reference or inline text.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

/// Response from `generateContent`.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[async_trait]
impl FileStoreBackend for GeminiBackend {
    #[instrument(skip(self, data), fields(subsystem = "inference", component = "gemini", op = "upload_file", file_size = data.len(), file_name = display_name))]
    async fn upload_file(
        &self,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFileRef> {
        let url = format!(
            "{}/upload/v1beta/files?uploadType=multipart&key={}",
            self.base_url, self.api_key
        );

        let metadata = serde_json::to_string(&UploadMetadata {
            file: UploadMetadataFile { display_name },
        })?;

        let metadata_part = reqwest::multipart::Part::text(metadata)
            .mime_str("application/json")
            .map_err(|e| Error::Upload(format!("Failed to create metadata part: {}", e)))?;
        let file_part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(display_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| Error::Upload(format!("Failed to create file part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .timeout(Duration::from_secs(self.upload_timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Upload(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upload(format!(
                "File store returned {}: {}",
                status, body
            )));
        }

        let result: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Upload(format!("Failed to parse response: {}", e)))?;

        Ok(RemoteFileRef {
            uri: result.file.uri,
            mime_type: result.file.mime_type,
            display_name: result
                .file
                .display_name
                .unwrap_or_else(|| display_name.to_string()),
        })
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_internal(vec![Part {
            file_data: None,
            text: Some(prompt.to_string()),
        }])
        .await
    }

    #[instrument(skip(self, file, prompt), fields(subsystem = "inference", component = "gemini", op = "generate_with_file", model = %self.model, prompt_len = prompt.len()))]
    async fn generate_with_file(&self, file: &RemoteFileRef, prompt: &str) -> Result<String> {
        self.generate_internal(vec![
            Part {
                file_data: Some(FileData {
                    mime_type: file.mime_type.clone(),
                    file_uri: file.uri.clone(),
                }),
                text: None,
            },
            Part {
                file_data: None,
                text: Some(prompt.to_string()),
            },
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AiBackend for GeminiBackend {
    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    info!("AI service health check passed");
                    Ok(true)
                } else {
                    warn!("AI service health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("AI service health check error: {}", e);
                Ok(false)
            }
        }
    }
}
