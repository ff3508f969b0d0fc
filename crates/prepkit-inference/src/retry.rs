//! Sequential fixed-delay retry loop for file-store uploads.
//!
//! Only the upload step is retried; a generation call surfaces its first
//! failure to the caller. Attempts never overlap and the delay is
//! constant, not exponential.

use std::time::Duration;

use tracing::{info, warn};

use prepkit_core::defaults::UPLOAD_RETRY_DELAY_MS;
use prepkit_core::{Error, FileStoreBackend, RemoteFileRef, Result};

/// Upload `data` with up to `max_attempts` sequential attempts, waiting a
/// fixed [`UPLOAD_RETRY_DELAY_MS`] between attempts.
///
/// Either a [`RemoteFileRef`] is returned or the call fails entirely with
/// [`Error::UploadFailed`] carrying the last underlying error; there is no
/// partial-success state.
pub async fn upload_with_retry<B: FileStoreBackend + ?Sized>(
    backend: &B,
    data: &[u8],
    mime_type: &str,
    display_name: &str,
    max_attempts: usize,
) -> Result<RemoteFileRef> {
    if max_attempts == 0 {
        return Err(Error::InvalidInput(
            "max_attempts must be at least 1".to_string(),
        ));
    }

    for attempt in 1..=max_attempts {
        info!(
            attempt,
            max_attempts,
            file_name = display_name,
            "Uploading file"
        );
        match backend.upload_file(data, mime_type, display_name).await {
            Ok(file_ref) => {
                info!(attempt, uri = %file_ref.uri, "File uploaded successfully");
                return Ok(file_ref);
            }
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "Upload attempt failed");
                if attempt == max_attempts {
                    return Err(Error::UploadFailed {
                        attempts: max_attempts,
                        last_error: e.to_string(),
                    });
                }
                tokio::time::sleep(Duration::from_millis(UPLOAD_RETRY_DELAY_MS)).await;
            }
        }
    }

    unreachable!("retry loop returns on success or final attempt")
}
