/// Supabase platform client
///
/// This module wraps the three Supabase services TaskFlow delegates to:
///
/// - `client`: the injected client handle and error type
/// - `table`: PostgREST table operations (insert/select/update/delete)
/// - `auth_api`: GoTrue user sign-up, password sign-in, and admin lookup
/// - `storage`: object storage upload, public URL, and removal
///
/// The platform is treated as an opaque dependency: all durability, query
/// execution, and credential verification happen on the other side of these
/// HTTP calls.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::supabase::SupabaseClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SupabaseClient::new("https://project.supabase.co", "service-role-key");
///
/// #[derive(serde::Deserialize)]
/// struct Row { id: uuid::Uuid }
///
/// let rows: Vec<Row> = client.table("projects").eq("owner_id", "abc").select().await?;
/// # Ok(())
/// # }
/// ```

pub mod auth_api;
pub mod client;
pub mod storage;
pub mod table;

pub use auth_api::AuthUser;
pub use client::{SupabaseClient, SupabaseError};
