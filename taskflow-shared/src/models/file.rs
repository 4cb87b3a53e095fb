/// Task file attachments and the upload saga
///
/// An attachment is two external writes: the bytes go to object storage under
/// a generated name, then a metadata row is inserted referencing them. The
/// two writes are not atomic; when the metadata insert fails, the stored
/// object is deleted best-effort (its own failure is logged and swallowed) so
/// storage is not left holding unreferenced bytes. A crash between the two
/// writes can still leave an orphaned object (accepted limitation).
///
/// Validation (extension allow-list, size cap) happens before any network
/// call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::supabase::{SupabaseClient, SupabaseError};

/// File extensions accepted for upload (lowercase, without the dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "gif", "csv", "xlsx",
];

/// Maximum upload size in bytes (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Errors from the attachment upload path
#[derive(Debug, Error)]
pub enum UploadError {
    /// Extension missing or not on the allow-list
    #[error("File type not allowed: {0}")]
    ExtensionNotAllowed(String),

    /// File exceeds [`MAX_FILE_SIZE`]
    #[error("File too large: {size} bytes (max {max})", max = MAX_FILE_SIZE)]
    TooLarge { size: usize },

    /// The object store rejected the write
    #[error("Storage upload failed: {0}")]
    Storage(#[source] SupabaseError),

    /// The metadata insert failed (the stored object has been removed
    /// best-effort)
    #[error("File record insert failed: {0}")]
    Metadata(#[source] SupabaseError),
}

/// Attachment metadata row (`task_files` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFile {
    /// Task this file is attached to
    pub task_id: Uuid,

    /// Original filename as uploaded by the client
    pub file_name: String,

    /// Generated storage path (UUID + original extension)
    pub file_path: String,

    /// File extension, with leading dot (".txt")
    pub file_type: String,

    /// Size in bytes
    pub file_size: i64,

    /// Uploading user, when known
    pub uploaded_by: Option<Uuid>,
}

/// A stored attachment: its metadata row plus the retrievable URL
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Metadata as recorded in the store
    pub metadata: TaskFile,

    /// Public URL of the stored object
    pub url: String,
}

/// Extracts the lowercase extension of a filename, if any
fn extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Validates filename and size against the upload rules
///
/// Returns the lowercase extension on success.
pub fn validate_upload(file_name: &str, size: usize) -> Result<String, UploadError> {
    let ext = extension(file_name)
        .ok_or_else(|| UploadError::ExtensionNotAllowed(file_name.to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(UploadError::ExtensionNotAllowed(format!(".{}", ext)));
    }
    if size > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge { size });
    }

    Ok(ext)
}

impl TaskFile {
    /// Stores an attachment: validate, upload bytes, record metadata
    ///
    /// The object is written under a generated `{uuid}.{ext}` path so client
    /// filenames can never collide. If the metadata insert fails after the
    /// object write succeeded, the object is removed best-effort and the
    /// insert error is returned.
    pub async fn store(
        client: &SupabaseClient,
        bucket: &str,
        task_id: Uuid,
        uploaded_by: Option<Uuid>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, UploadError> {
        let ext = validate_upload(file_name, bytes.len())?;

        let file_size = bytes.len() as i64;
        let file_path = format!("{}.{}", Uuid::new_v4(), ext);

        client
            .upload_object(bucket, &file_path, bytes)
            .await
            .map_err(UploadError::Storage)?;

        let url = client.public_url(bucket, &file_path);

        let row = TaskFile {
            task_id,
            file_name: file_name.to_string(),
            file_path: file_path.clone(),
            file_type: format!(".{}", ext),
            file_size,
            uploaded_by,
        };

        let insert_result: Result<Vec<TaskFile>, SupabaseError> =
            client.table("task_files").insert(&row).await;

        let metadata = match insert_result {
            Ok(mut rows) => match rows.pop() {
                Some(metadata) => metadata,
                None => {
                    Self::cleanup_object(client, bucket, &file_path).await;
                    return Err(UploadError::Metadata(SupabaseError::MissingRow(
                        "task_files insert",
                    )));
                }
            },
            Err(err) => {
                Self::cleanup_object(client, bucket, &file_path).await;
                return Err(UploadError::Metadata(err));
            }
        };

        Ok(StoredFile { metadata, url })
    }

    /// Compensating delete for the upload saga; failures are logged, never
    /// escalated
    async fn cleanup_object(client: &SupabaseClient, bucket: &str, path: &str) {
        if let Err(err) = client.remove_object(bucket, path).await {
            tracing::warn!(
                bucket = bucket,
                path = path,
                error = %err,
                "Failed to remove orphaned object after metadata insert failure"
            );
        }
    }
}
