/// PostgREST table operations
///
/// A minimal request builder over the platform's `/rest/v1` table API.
/// Filters are equality-only, which is all the repositories need:
///
/// ```no_run
/// # use taskflow_shared::supabase::SupabaseClient;
/// # #[derive(serde::Deserialize)]
/// # struct Project { id: uuid::Uuid }
/// # async fn example(client: &SupabaseClient) -> Result<(), Box<dyn std::error::Error>> {
/// let rows: Vec<Project> = client
///     .table("projects")
///     .eq("id", "a-project-id")
///     .eq("owner_id", "a-user-id")
///     .select()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Mutations request `Prefer: return=representation` so the affected rows
/// come back in the response body; callers use the row count to distinguish
/// "updated" from "nothing matched".

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::{SupabaseClient, SupabaseError};

impl SupabaseClient {
    /// Starts a request against a table
    pub fn table<'a>(&'a self, name: &'a str) -> TableRequest<'a> {
        TableRequest {
            client: self,
            table: name,
            filters: Vec::new(),
        }
    }
}

/// A pending request against one table
pub struct TableRequest<'a> {
    client: &'a SupabaseClient,
    table: &'a str,
    filters: Vec<(String, String)>,
}

impl<'a> TableRequest<'a> {
    /// Adds an equality filter (`column = value`)
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Inserts a row and returns the written rows
    pub async fn insert<R: DeserializeOwned>(
        self,
        row: &impl Serialize,
    ) -> Result<Vec<R>, SupabaseError> {
        self.execute(Method::POST, Some(serde_json::json!(row))).await
    }

    /// Fetches all rows matching the filters
    pub async fn select<R: DeserializeOwned>(self) -> Result<Vec<R>, SupabaseError> {
        self.execute(Method::GET, None).await
    }

    /// Applies a partial update to matching rows and returns them
    ///
    /// Only the fields present in `patch` are written; everything else is
    /// left untouched by PostgREST.
    pub async fn update<R: DeserializeOwned>(
        self,
        patch: &impl Serialize,
    ) -> Result<Vec<R>, SupabaseError> {
        self.execute(Method::PATCH, Some(serde_json::json!(patch)))
            .await
    }

    /// Deletes matching rows and returns them
    pub async fn delete<R: DeserializeOwned>(self) -> Result<Vec<R>, SupabaseError> {
        self.execute(Method::DELETE, None).await
    }

    async fn execute<R: DeserializeOwned>(
        self,
        method: Method,
        body: Option<serde_json::Value>,
    ) -> Result<Vec<R>, SupabaseError> {
        let endpoint = self.client.endpoint(&format!("rest/v1/{}", self.table));
        let is_mutation = method != Method::GET;

        let mut request = self.client.http().request(method.clone(), &endpoint);
        request = self.client.authorize(request);

        let mut query: Vec<(String, String)> = self.filters;
        if method == Method::GET {
            query.push(("select".to_string(), "*".to_string()));
        }
        request = request.query(&query);

        if is_mutation {
            request = request.header("Prefer", "return=representation");
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|source| {
            SupabaseError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Table {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<R>>()
            .await
            .map_err(|e| SupabaseError::Decode(format!("{} rows from {}: {}", self.table, endpoint, e)))
    }
}
