//! Document text extraction for the feedback sidecar.
//!
//! Uses `pdftotext` (poppler-utils) when available, guarded by a
//! per-command timeout. When the tool is missing or fails, falls back to a
//! lossy UTF-8 read of the raw bytes so the feedback flow still has
//! something to ground its prompt on.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, warn};

use prepkit_core::defaults::EXTRACTION_CMD_TIMEOUT_SECS;
use prepkit_core::{Error, Result};

/// Run a command with a timeout, returning stdout as a string.
async fn run_cmd_with_timeout(cmd: &mut Command, timeout_secs: u64) -> Result<String> {
    let output = tokio::time::timeout(std::time::Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| {
            Error::Extraction(format!("External command timed out after {}s", timeout_secs))
        })?
        .map_err(|e| Error::Extraction(format!("Failed to execute command: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Extraction(format!(
            "Command failed (exit {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract the text content of a PDF on disk.
pub async fn extract_pdf_text(path: &Path) -> Result<String> {
    let mut cmd = Command::new("pdftotext");
    cmd.arg(path).arg("-");

    match run_cmd_with_timeout(&mut cmd, EXTRACTION_CMD_TIMEOUT_SECS).await {
        Ok(text) => {
            debug!(
                file_name = %path.display(),
                response_len = text.len(),
                "PDF text extracted"
            );
            Ok(text)
        }
        Err(e) => {
            warn!(error = %e, "pdftotext unavailable, falling back to raw read");
            let bytes = tokio::fs::read(path).await?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
