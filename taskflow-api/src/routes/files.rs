/// File attachment endpoints
///
/// `POST /api/files/upload?task_id=&user_id=` accepts a multipart `file`
/// part. Validation (extension allow-list, 10 MiB cap) runs before any
/// platform call; only then is the target task resolved and the two-phase
/// store (object bytes, then metadata row) performed.
///
/// The `user_id` query parameter is kept for API compatibility; when absent
/// the uploader is the authenticated caller.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskflow_shared::models::{file::TaskFile, project::Project, task::Task};
use uuid::Uuid;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Upload query parameters
#[derive(Debug, Deserialize)]
pub struct UploadParams {
    /// Task the file attaches to
    pub task_id: Uuid,

    /// Uploader override; defaults to the caller
    pub user_id: Option<Uuid>,
}

/// Upload a file attachment for a task
///
/// # Endpoint
///
/// ```text
/// POST /api/files/upload?task_id=<uuid>
/// Content-Type: multipart/form-data
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "message": "File uploaded successfully",
///   "data": {
///     "task_id": "...",
///     "file_name": "notes.txt",
///     "file_path": "3f1e....txt",
///     "url": "https://.../storage/v1/object/public/task-files/3f1e....txt",
///     "size": 500
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: disallowed extension, oversized file, missing part
/// - `404 Not Found`: task missing or not in one of the caller's projects
/// - `500 Internal Server Error`: storage or metadata write failed
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<UploadParams>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let (file_name, bytes) = read_file_part(multipart).await?;

    // Reject bad uploads before any platform call
    taskflow_shared::models::file::validate_upload(&file_name, bytes.len())?;

    let task = Task::find_by_id(&state.supabase, params.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Project::find_for_owner(&state.supabase, task.project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let uploaded_by = params.user_id.or(Some(auth.user_id));

    let stored = TaskFile::store(
        &state.supabase,
        state.storage_bucket(),
        params.task_id,
        uploaded_by,
        &file_name,
        bytes,
    )
    .await?;

    let body = serde_json::json!({
        "message": "File uploaded successfully",
        "data": {
            "task_id": stored.metadata.task_id,
            "file_name": stored.metadata.file_name,
            "file_path": stored.metadata.file_path,
            "url": stored.url,
            "size": stored.metadata.file_size,
        }
    });

    Ok((StatusCode::CREATED, Json(body)))
}

/// Pulls the `file` part (name + bytes) out of the multipart body
async fn read_file_part(mut multipart: Multipart) -> ApiResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| ApiError::BadRequest("File part has no filename".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file part: {}", e)))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(ApiError::BadRequest("Missing file part".to_string()))
}
