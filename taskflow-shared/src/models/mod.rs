/// Domain models for TaskFlow
///
/// This module contains the domain models and their persistence operations.
/// Persistence is delegated to the Supabase platform; each model's operations
/// take an injected [`crate::supabase::SupabaseClient`].
///
/// # Models
///
/// - `user`: Projection of auth-service users plus the session token envelope
/// - `project`: Projects, owner-scoped CRUD
/// - `task`: Tasks within a project
/// - `file`: Task file attachments and the upload saga

pub mod file;
pub mod project;
pub mod task;
pub mod user;
