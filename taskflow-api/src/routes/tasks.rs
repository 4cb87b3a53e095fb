/// Task endpoints
///
/// Every operation verifies that the task's parent project belongs to the
/// caller before touching the task; a project owned by someone else surfaces
/// as 404, matching the project routes. Within a project, tasks may be
/// assigned to and created on behalf of any user.
///
/// # Endpoints
///
/// - `POST   /tasks/` - Create a task in one of the caller's projects
/// - `GET    /tasks/{id}` - Fetch a task
/// - `GET    /tasks/project/{project_id}` - List a project's tasks
/// - `PUT    /tasks/{id}` - Partial update
/// - `DELETE /tasks/{id}` - Delete, returning `{"success": bool}`

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use taskflow_shared::models::{
    project::Project,
    task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Delete response: whether any row was removed
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub success: bool,
}

/// Resolves a task and checks its parent project against the caller
///
/// Ownership mismatch and non-existence are indistinguishable to the caller.
async fn find_owned_task(
    state: &AppState,
    task_id: Uuid,
    owner_id: Uuid,
) -> ApiResult<Option<Task>> {
    let Some(task) = Task::find_by_id(&state.supabase, task_id).await? else {
        return Ok(None);
    };

    let project = Project::find_for_owner(&state.supabase, task.project_id, owner_id).await?;
    Ok(project.map(|_| task))
}

/// Create a task
///
/// The parent project must exist and belong to the caller. `created_by` is
/// the caller's identity.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(input): Json<CreateTask>,
) -> ApiResult<Json<Task>> {
    Project::find_for_owner(&state.supabase, input.project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let task = Task::create(&state.supabase, input, Some(auth.user_id)).await?;

    Ok(Json(task))
}

/// Fetch one task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = find_owned_task(&state, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// List all tasks in one of the caller's projects
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Task>>> {
    Project::find_for_owner(&state.supabase, project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let tasks = Task::list_for_project(&state.supabase, project_id).await?;

    Ok(Json(tasks))
}

/// Partially update a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    find_owned_task(&state, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let task = Task::update(&state.supabase, id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// Responds `{"success": false}` rather than 404 when the task is already
/// gone; a task in someone else's project is a 404 like everywhere else.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let Some(task) = Task::find_by_id(&state.supabase, id).await? else {
        return Ok(Json(DeleteTaskResponse { success: false }));
    };

    Project::find_for_owner(&state.supabase, task.project_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let success = Task::delete(&state.supabase, id).await?;

    Ok(Json(DeleteTaskResponse { success }))
}
