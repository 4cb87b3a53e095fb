/// Task model and persistence operations
///
/// Tasks belong to a project. `created_by` records the creating user; when
/// the caller's identity is not supplied, it falls back to the parent
/// project's owner, which also serves as the existence check for the project.
///
/// Route-level ownership enforcement (a task may only be touched by its
/// project's owner) lives in the API layer; the operations here are scoped by
/// id and project id only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::project::Project;
use crate::supabase::{SupabaseClient, SupabaseError};

/// Errors from task operations
#[derive(Debug, Error)]
pub enum TaskError {
    /// The parent project does not exist
    #[error("Project not found")]
    ProjectNotFound,

    /// The platform call failed
    #[error(transparent)]
    Supabase(#[from] SupabaseError),
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID (UUID v4, generated here)
    pub id: Uuid,

    /// Parent project
    pub project_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Workflow status (free-form, e.g. "todo", "in_progress", "done")
    pub status: String,

    /// Priority label (free-form, e.g. "low", "medium", "high")
    pub priority: String,

    /// Assignee, if any
    pub assigned_to: Option<Uuid>,

    /// Creating user
    pub created_by: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    /// Parent project
    pub project_id: Uuid,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Workflow status
    pub status: String,

    /// Priority label
    pub priority: String,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,
}

/// Partial update for a task
///
/// Only fields that are `Some` are written. `assigned_to` is a `Uuid`, so
/// whatever string form arrived on the wire is stored in its canonical
/// hyphenated form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// New assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
}

impl UpdateTask {
    /// Builds the PATCH document: supplied fields plus a fresh `updated_at`
    pub fn patch_document(&self, now: DateTime<Utc>) -> serde_json::Value {
        let mut patch = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        patch.insert("updated_at".to_string(), serde_json::json!(now));
        serde_json::Value::Object(patch)
    }
}

impl Task {
    /// Creates a task
    ///
    /// When `created_by` is `None`, the parent project's `owner_id` is used;
    /// a missing project fails with [`TaskError::ProjectNotFound`].
    pub async fn create(
        client: &SupabaseClient,
        input: CreateTask,
        created_by: Option<Uuid>,
    ) -> Result<Task, TaskError> {
        let created_by = match created_by {
            Some(id) => id,
            None => Project::find_by_id(client, input.project_id)
                .await?
                .ok_or(TaskError::ProjectNotFound)?
                .owner_id,
        };

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            assigned_to: input.assigned_to,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let mut rows: Vec<Task> = client.table("tasks").insert(&task).await?;
        rows.pop()
            .ok_or(TaskError::Supabase(SupabaseError::MissingRow("task insert")))
    }

    /// Fetches one task by id
    pub async fn find_by_id(
        client: &SupabaseClient,
        id: Uuid,
    ) -> Result<Option<Task>, SupabaseError> {
        let mut rows: Vec<Task> = client.table("tasks").eq("id", id).select().await?;
        Ok(rows.pop())
    }

    /// Returns all tasks in a project
    pub async fn list_for_project(
        client: &SupabaseClient,
        project_id: Uuid,
    ) -> Result<Vec<Task>, SupabaseError> {
        client
            .table("tasks")
            .eq("project_id", project_id)
            .select()
            .await
    }

    /// Applies a partial update
    ///
    /// Returns `None` when no row matched.
    pub async fn update(
        client: &SupabaseClient,
        id: Uuid,
        update: UpdateTask,
    ) -> Result<Option<Task>, SupabaseError> {
        let patch = update.patch_document(Utc::now());

        let mut rows: Vec<Task> = client.table("tasks").eq("id", id).update(&patch).await?;
        Ok(rows.pop())
    }

    /// Deletes a task
    ///
    /// Returns whether any row was removed; "zero rows deleted" is left for
    /// the caller to surface.
    pub async fn delete(client: &SupabaseClient, id: Uuid) -> Result<bool, SupabaseError> {
        let rows: Vec<Task> = client.table("tasks").eq("id", id).delete().await?;
        Ok(!rows.is_empty())
    }
}
