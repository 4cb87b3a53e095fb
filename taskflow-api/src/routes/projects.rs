/// Project endpoints
///
/// All operations are scoped to the authenticated caller. Update and delete
/// filter by both project id and owner id, so "exists but not yours" and
/// "does not exist" both come back as 404.
///
/// # Endpoints
///
/// - `POST   /api/projects/` - Create a project owned by the caller
/// - `GET    /api/projects/` - List the caller's projects
/// - `PUT    /api/projects/{id}` - Partial update
/// - `DELETE /api/projects/{id}` - Delete, returning the removed record

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskflow_shared::models::project::{CreateProject, Project, UpdateProject};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Create a project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(ApiError::from_validation)?;

    let project = Project::create(
        &state.supabase,
        CreateProject {
            name: req.name,
            description: req.description,
        },
        auth.user_id,
    )
    .await?;

    Ok(Json(project))
}

/// List the caller's projects
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_for_owner(&state.supabase, auth.user_id).await?;

    Ok(Json(projects))
}

/// Partially update one of the caller's projects
///
/// Absent fields are left untouched; `updated_at` is always stamped.
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateProject>,
) -> ApiResult<Json<Project>> {
    let project = Project::update(&state.supabase, id, auth.user_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Delete one of the caller's projects
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = Project::delete(&state.supabase, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}
