//! Temporary artifact store: raw uploads and sidecar files.
//!
//! Two directories, two lifecycles. The uploads dir keeps the raw PDF under
//! its sanitized display name so the practice flow can re-upload it by
//! name. The temp dir keeps JSON sidecars pairing extracted document text
//! with the remote file URI so the feedback flow never re-uploads the
//! document. Both are swept by `/api/cleanup`; nothing here survives a
//! sweep, and request paths tolerate files vanishing underneath them.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use prepkit_core::defaults::{ENV_TEMP_DIR, ENV_UPLOAD_DIR, TEMP_DIR, UPLOAD_DIR};
use prepkit_core::{sanitize_filename, Error, Result};

/// Sidecar pairing extracted document text with its remote file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sidecar {
    pub file_content: String,
    pub file_uri: String,
    pub created_at: DateTime<Utc>,
}

/// Filesystem-backed store for temporary artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    uploads_dir: PathBuf,
    temp_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(uploads_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Create from environment variables with default directories.
    pub fn from_env() -> Self {
        let uploads_dir =
            std::env::var(ENV_UPLOAD_DIR).unwrap_or_else(|_| UPLOAD_DIR.to_string());
        let temp_dir = std::env::var(ENV_TEMP_DIR).unwrap_or_else(|_| TEMP_DIR.to_string());
        Self::new(uploads_dir, temp_dir)
    }

    /// Create both directories if absent.
    pub async fn ensure_dirs(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        Ok(())
    }

    /// On-disk path for an upload, by sanitized display name.
    pub fn upload_path(&self, display_name: &str) -> PathBuf {
        self.uploads_dir.join(sanitize_filename(display_name))
    }

    /// Persist an upload under its sanitized display name and return the
    /// path. An existing file of the same name is overwritten.
    pub async fn save_upload(&self, display_name: &str, data: &[u8]) -> Result<PathBuf> {
        self.ensure_dirs().await?;
        let path = self.upload_path(display_name);
        tokio::fs::write(&path, data).await?;
        debug!(file_name = %path.display(), file_size = data.len(), "Upload saved");
        Ok(path)
    }

    /// Read a previously saved upload back.
    pub async fn read_upload(&self, display_name: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.upload_path(display_name)).await?)
    }

    /// Delete a saved upload. Already absent is fine.
    pub async fn delete_upload(&self, display_name: &str) -> Result<()> {
        match tokio::fs::remove_file(self.upload_path(display_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a sidecar under a fresh random name, returning its path as
    /// handed to the client.
    pub async fn write_sidecar(&self, sidecar: &Sidecar) -> Result<PathBuf> {
        self.ensure_dirs().await?;
        let path = self.temp_dir.join(format!("{}.json", Uuid::new_v4()));
        let json = serde_json::to_string(sidecar)?;
        tokio::fs::write(&path, json).await?;
        debug!(file_name = %path.display(), "Sidecar saved");
        Ok(path)
    }

    /// Resolve a client-supplied sidecar path to a file inside the temp
    /// dir. Only the final path component is honored, so a client cannot
    /// point this at arbitrary files.
    fn sidecar_path(&self, client_path: &str) -> Result<PathBuf> {
        let name = Path::new(client_path)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidInput("Invalid tempFilePath".to_string()))?;
        if !name.ends_with(".json") {
            return Err(Error::InvalidInput("Invalid tempFilePath".to_string()));
        }
        Ok(self.temp_dir.join(name))
    }

    /// Read a sidecar back.
    pub async fn read_sidecar(&self, client_path: &str) -> Result<Sidecar> {
        let path = self.sidecar_path(client_path)?;
        let json = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Delete a sidecar. Returns false when it was already absent, which is
    /// an expected race with `/api/cleanup` and not an error.
    pub async fn delete_sidecar(&self, client_path: &str) -> Result<bool> {
        let path = self.sidecar_path(client_path)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file_name = %path.display(), "Sidecar already absent");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every file directly under `dir`. A missing dir is zero files.
    async fn clear_dir(dir: &Path) -> Result<usize> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Sweep the uploads dir.
    pub async fn clear_uploads(&self) -> Result<usize> {
        Self::clear_dir(&self.uploads_dir).await
    }

    /// Sweep both directories, returning the number of files removed.
    pub async fn cleanup_all(&self) -> Result<usize> {
        let uploads = Self::clear_dir(&self.uploads_dir).await?;
        let temp = Self::clear_dir(&self.temp_dir).await?;
        Ok(uploads + temp)
    }
}
