//! HTTP handlers for the prepkit endpoints.
//!
//! Every generation endpoint follows the same shape: accept a multipart
//! PDF, persist it locally, push it to the remote file store with retries,
//! call the model once with a file reference plus a prompt, and return the
//! raw reply text. Parsing the reply into structures happens client-side;
//! the handlers only run the tolerant parsers for diagnostics.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use prepkit_core::defaults::UPLOAD_MAX_ATTEMPTS;
use prepkit_core::prompts::{
    feedback_prompt, feedback_prompt_for_document, more_questions_prompt, CHEATSHEET_PROMPT,
    QUIZ_PROMPT,
};
use prepkit_core::{
    parse_quiz_counting, render_cheatsheet, sanitize_filename, split_feedback_lines, struggled,
    validate_upload_default, RemoteFileRef, NO_FEEDBACK_NEEDED,
};
use prepkit_inference::upload_with_retry;

use crate::error::ApiError;
use crate::store::Sidecar;
use crate::AppState;

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub message: String,
    pub generated_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub message: String,
    pub generated_quiz: String,
    pub temp_file_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicsResponse {
    pub message: String,
    pub generated_mnemonics: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub questions: Option<Vec<String>>,
    pub attempts: Option<Vec<u32>>,
    /// Sidecar variant: the path handed out by the quiz endpoint.
    pub temp_file_path: Option<String>,
    /// Re-upload variant: the display name of the original upload.
    pub original_file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoreQuestionsRequest {
    pub questions: Option<Vec<String>>,
    pub attempts: Option<Vec<u32>>,
    pub original_file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTempFileRequest {
    pub temp_file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub version: String,
}

// =============================================================================
// MULTIPART UPLOAD HANDLING
// =============================================================================

/// Fields accepted on the generation endpoints.
struct UploadForm {
    file_name: String,
    data: Vec<u8>,
    text_prompt: Option<String>,
}

/// Pull the `file` and optional `textPrompt` fields out of a multipart
/// form, rejecting anything that is not a PDF upload.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut text_prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(sanitize_filename)
                    .unwrap_or_else(|| "upload.pdf".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec();
                file = Some((file_name, data));
            }
            Some("textPrompt") => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                if !val.trim().is_empty() {
                    text_prompt = Some(val.trim().to_string());
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let validation = validate_upload_default(&file_name, &data);
    if !validation.allowed {
        return Err(ApiError::BadRequest(
            validation
                .block_reason
                .unwrap_or_else(|| "Upload rejected".to_string()),
        ));
    }

    Ok(UploadForm {
        file_name,
        data,
        text_prompt,
    })
}

/// Persist the upload locally and push it to the remote file store with the
/// standard retry budget.
async fn save_and_upload(
    state: &AppState,
    form: &UploadForm,
) -> Result<RemoteFileRef, ApiError> {
    state.store.save_upload(&form.file_name, &form.data).await?;

    let file_ref = upload_with_retry(
        state.ai.as_ref(),
        &form.data,
        "application/pdf",
        &form.file_name,
        UPLOAD_MAX_ATTEMPTS,
    )
    .await?;

    info!(
        file_name = %form.file_name,
        uri = %file_ref.uri,
        "Uploaded file to remote store"
    );
    Ok(file_ref)
}

// =============================================================================
// GENERATION ENDPOINTS
// =============================================================================

/// `POST /upload-and-generate`: cheat-sheet generation.
pub async fn upload_and_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;
    let file_ref = save_and_upload(&state, &form).await?;

    let prompt = form.text_prompt.as_deref().unwrap_or(CHEATSHEET_PROMPT);
    let generated_text = state.ai.generate_with_file(&file_ref, prompt).await?;

    debug!(
        section_count = render_cheatsheet(&generated_text).len(),
        response_len = generated_text.len(),
        "Cheat sheet generated"
    );

    // The upload has served its purpose for this flow.
    if let Err(e) = state.store.delete_upload(&form.file_name).await {
        warn!(error = %e, "Failed to delete local upload");
    }

    Ok(Json(GenerateResponse {
        message: "Content generated successfully".to_string(),
        generated_text,
    }))
}

/// `POST /upload-and-generate-quiz`: quiz generation.
///
/// Keeps the local upload (for `/get-morequestions`) and writes a sidecar
/// pairing the extracted document text with the remote URI (for
/// `/get-feedback`).
pub async fn upload_and_generate_quiz(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<QuizResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;
    let file_ref = save_and_upload(&state, &form).await?;

    // The format instruction is fixed for quizzes; a free-form prompt would
    // produce a reply the client cannot parse.
    let generated_quiz = state.ai.generate_with_file(&file_ref, QUIZ_PROMPT).await?;

    let parse = parse_quiz_counting(&generated_quiz);
    if parse.questions.is_empty() {
        warn!(
            question_count = 0,
            dropped_segments = parse.dropped_segments,
            "Quiz reply contained no parseable questions"
        );
    } else {
        debug!(
            question_count = parse.questions.len(),
            dropped_segments = parse.dropped_segments,
            "Quiz reply parsed"
        );
    }

    let file_content =
        crate::extract::extract_pdf_text(&state.store.upload_path(&form.file_name)).await?;
    let temp_file_path = state
        .store
        .write_sidecar(&Sidecar {
            file_content,
            file_uri: file_ref.uri.clone(),
            created_at: chrono::Utc::now(),
        })
        .await?;

    Ok(Json(QuizResponse {
        message: "Quiz generated successfully".to_string(),
        generated_quiz,
        temp_file_path: temp_file_path.to_string_lossy().into_owned(),
    }))
}

/// `POST /upload-and-generate-mnemonics`: mnemonics generation. The text
/// prompt is required here; there is no sensible default.
pub async fn upload_and_generate_mnemonics(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MnemonicsResponse>, ApiError> {
    let form = read_upload_form(multipart).await?;
    let prompt = form
        .text_prompt
        .clone()
        .ok_or_else(|| ApiError::BadRequest("Missing textPrompt".to_string()))?;

    let file_ref = save_and_upload(&state, &form).await?;
    let generated_mnemonics = state.ai.generate_with_file(&file_ref, &prompt).await?;

    if let Err(e) = state.store.delete_upload(&form.file_name).await {
        warn!(error = %e, "Failed to delete local upload");
    }

    Ok(Json(MnemonicsResponse {
        message: "Mnemonics generated successfully".to_string(),
        generated_mnemonics,
    }))
}

// =============================================================================
// FEEDBACK / PRACTICE ENDPOINTS
// =============================================================================

fn require<T>(value: Option<T>, message: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

/// `POST /get-feedback`: feedback on struggled questions.
///
/// Two document sources, preferred in order: a sidecar path (extracted text
/// is inlined into the prompt, no re-upload), or the original upload's name
/// (the document is pushed back to the file store and attached by
/// reference).
pub async fn get_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let questions = require(request.questions, "Invalid or missing questions data")?;
    let attempts = require(request.attempts, "Invalid or missing attempts data")?;
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid or missing questions data".to_string(),
        ));
    }
    if attempts.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid or missing attempts data".to_string(),
        ));
    }

    let struggled_questions = struggled(&questions, &attempts);

    if let Some(temp_file_path) = request.temp_file_path {
        let sidecar = state.store.read_sidecar(&temp_file_path).await?;
        if sidecar.file_content.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Invalid or missing file content".to_string(),
            ));
        }

        if struggled_questions.is_empty() {
            // Every question went right on the first try; nothing to ask
            // the model about.
            return Ok(Json(FeedbackResponse {
                feedback: vec![NO_FEEDBACK_NEEDED.to_string()],
            }));
        }

        let prompt = feedback_prompt(&sidecar.file_content, &struggled_questions);
        let generated = state.ai.generate(&prompt).await?;

        // The sidecar is read at most once; a cleanup racing us is fine.
        if let Err(e) = state.store.delete_sidecar(&temp_file_path).await {
            warn!(error = %e, "Failed to delete sidecar after feedback");
        }
        match state.store.clear_uploads().await {
            Ok(removed) => debug!(removed, "Uploads folder cleared"),
            Err(e) => warn!(error = %e, "Failed to clear uploads folder"),
        }

        return Ok(Json(FeedbackResponse {
            feedback: split_feedback_lines(&generated),
        }));
    }

    let original_file_name = require(
        request.original_file_name,
        "Invalid or missing tempFilePath",
    )?;

    if struggled_questions.is_empty() {
        return Ok(Json(FeedbackResponse {
            feedback: vec![NO_FEEDBACK_NEEDED.to_string()],
        }));
    }

    let data = state
        .store
        .read_upload(&original_file_name)
        .await
        .map_err(|e| ApiError::Internal(format!("Original upload no longer available: {}", e)))?;
    let file_ref = upload_with_retry(
        state.ai.as_ref(),
        &data,
        "application/pdf",
        &sanitize_filename(&original_file_name),
        UPLOAD_MAX_ATTEMPTS,
    )
    .await?;

    let prompt = feedback_prompt_for_document(&struggled_questions);
    let generated = state.ai.generate_with_file(&file_ref, &prompt).await?;

    Ok(Json(FeedbackResponse {
        feedback: split_feedback_lines(&generated),
    }))
}

/// `POST /get-morequestions`: replacement questions covering the topics
/// the user struggled with, re-uploading the original document by name.
pub async fn get_more_questions(
    State(state): State<AppState>,
    Json(request): Json<MoreQuestionsRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let questions = require(request.questions, "Invalid or missing questions data")?;
    let attempts = require(request.attempts, "Invalid or missing attempts data")?;
    let original_file_name = require(
        request.original_file_name,
        "Invalid or missing original file name",
    )?;
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid or missing questions data".to_string(),
        ));
    }
    if attempts.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid or missing attempts data".to_string(),
        ));
    }

    let struggled_questions = struggled(&questions, &attempts);
    if struggled_questions.is_empty() {
        return Ok(Json(FeedbackResponse {
            feedback: vec![NO_FEEDBACK_NEEDED.to_string()],
        }));
    }

    let data = state
        .store
        .read_upload(&original_file_name)
        .await
        .map_err(|e| {
            ApiError::Internal(format!("Original upload no longer available: {}", e))
        })?;

    let file_ref = upload_with_retry(
        state.ai.as_ref(),
        &data,
        "application/pdf",
        &sanitize_filename(&original_file_name),
        UPLOAD_MAX_ATTEMPTS,
    )
    .await?;

    let prompt = more_questions_prompt(&struggled_questions);
    let generated = state.ai.generate_with_file(&file_ref, &prompt).await?;

    let parse = parse_quiz_counting(&generated);
    debug!(
        question_count = parse.questions.len(),
        dropped_segments = parse.dropped_segments,
        "Practice quiz reply parsed"
    );

    Ok(Json(FeedbackResponse {
        feedback: split_feedback_lines(&generated),
    }))
}

// =============================================================================
// ARTIFACT MANAGEMENT ENDPOINTS
// =============================================================================

/// `POST /api/delete-temp-file`: delete one sidecar. Already absent counts
/// as deleted; only unexpected I/O errors surface as failures.
pub async fn delete_temp_file(
    State(state): State<AppState>,
    Json(request): Json<DeleteTempFileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let temp_file_path = require(request.temp_file_path, "Missing tempFilePath")?;

    state.store.delete_sidecar(&temp_file_path).await?;

    Ok(Json(MessageResponse {
        message: "File deleted successfully".to_string(),
    }))
}

/// `POST /api/cleanup`: sweep the uploads and temp directories.
pub async fn cleanup(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .store
        .cleanup_all()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to clean up folders: {}", e)))?;

    info!(removed, "Uploads and temp folders cleaned up");
    Ok(Json(MessageResponse {
        message: "Cleanup successful".to_string(),
    }))
}

/// `GET /health`: service liveness and configured model.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.ai.model_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
