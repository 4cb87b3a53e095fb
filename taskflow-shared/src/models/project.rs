/// Project model and owner-scoped persistence operations
///
/// Every project has exactly one owner, set at creation from the caller's
/// identity. List, update, and delete all filter by owner id as well as
/// project id, so a project that exists but belongs to someone else is
/// indistinguishable from one that does not exist.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::models::project::{CreateProject, Project};
/// use taskflow_shared::supabase::SupabaseClient;
/// use uuid::Uuid;
///
/// # async fn example(client: &SupabaseClient, owner_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let project = Project::create(
///     client,
///     CreateProject { name: "Redesign".to_string(), description: None },
///     owner_id,
/// )
/// .await?;
/// assert_eq!(project.owner_id, owner_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::supabase::{SupabaseClient, SupabaseError};

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID (UUID v4, generated here)
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user; set once at creation, never changed
    pub owner_id: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Partial update for a project
///
/// Only fields that are `Some` are written; everything else is left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateProject {
    /// Builds the PATCH document: the supplied fields plus a fresh
    /// `updated_at` stamp
    pub fn patch_document(&self, now: DateTime<Utc>) -> serde_json::Value {
        let mut patch = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        patch.insert("updated_at".to_string(), serde_json::json!(now));
        serde_json::Value::Object(patch)
    }
}

impl Project {
    /// Creates a project owned by `owner_id`
    ///
    /// Generates a fresh UUID and stamps `created_at == updated_at`.
    /// An insert that returns no row surfaces as an error.
    pub async fn create(
        client: &SupabaseClient,
        input: CreateProject,
        owner_id: Uuid,
    ) -> Result<Project, SupabaseError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            owner_id,
            created_at: now,
            updated_at: now,
        };

        let mut rows: Vec<Project> = client.table("projects").insert(&project).await?;
        rows.pop().ok_or(SupabaseError::MissingRow("project insert"))
    }

    /// Returns all projects owned by `owner_id`
    ///
    /// Order is whatever the store returns; callers must not rely on it.
    pub async fn list_for_owner(
        client: &SupabaseClient,
        owner_id: Uuid,
    ) -> Result<Vec<Project>, SupabaseError> {
        client
            .table("projects")
            .eq("owner_id", owner_id)
            .select()
            .await
    }

    /// Fetches one project by id, regardless of owner
    pub async fn find_by_id(
        client: &SupabaseClient,
        id: Uuid,
    ) -> Result<Option<Project>, SupabaseError> {
        let mut rows: Vec<Project> = client.table("projects").eq("id", id).select().await?;
        Ok(rows.pop())
    }

    /// Fetches one project by id, only if owned by `owner_id`
    pub async fn find_for_owner(
        client: &SupabaseClient,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Project>, SupabaseError> {
        let mut rows: Vec<Project> = client
            .table("projects")
            .eq("id", id)
            .eq("owner_id", owner_id)
            .select()
            .await?;
        Ok(rows.pop())
    }

    /// Applies a partial update, scoped to the owner
    ///
    /// Returns `None` when no row matched: the project does not exist or is
    /// not owned by `owner_id`.
    pub async fn update(
        client: &SupabaseClient,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateProject,
    ) -> Result<Option<Project>, SupabaseError> {
        let patch = update.patch_document(Utc::now());

        let mut rows: Vec<Project> = client
            .table("projects")
            .eq("id", id)
            .eq("owner_id", owner_id)
            .update(&patch)
            .await?;
        Ok(rows.pop())
    }

    /// Deletes a project, scoped to the owner
    ///
    /// Returns the deleted record, or `None` when no row matched.
    pub async fn delete(
        client: &SupabaseClient,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Project>, SupabaseError> {
        let mut rows: Vec<Project> = client
            .table("projects")
            .eq("id", id)
            .eq("owner_id", owner_id)
            .delete()
            .await?;
        Ok(rows.pop())
    }
}
