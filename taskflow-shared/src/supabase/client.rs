/// Supabase client handle
///
/// An explicitly constructed client for one Supabase project. The handle is
/// built once at process startup and injected into every operation that needs
/// it; no module-scope singletons. Whether it acts with anonymous or
/// service-role privileges is decided solely by the API key it is given.
///
/// Cloning is cheap: the inner `reqwest::Client` is an `Arc` internally.
///
/// # Example
///
/// ```no_run
/// use taskflow_shared::supabase::SupabaseClient;
///
/// let service = SupabaseClient::new("https://project.supabase.co", "service-role-key");
/// let anon = SupabaseClient::new("https://project.supabase.co", "anon-key");
/// ```

use reqwest::RequestBuilder;
use thiserror::Error;

/// Errors returned by Supabase operations
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// The HTTP request itself failed (connection, TLS, timeout)
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// PostgREST rejected a table operation
    #[error("Table API error ({status}): {message}")]
    Table { status: u16, message: String },

    /// GoTrue rejected an auth operation
    #[error("Auth API error ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The storage service rejected an object operation
    #[error("Storage API error ({status}): {message}")]
    Storage { status: u16, message: String },

    /// A response body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A mutation that should return the written row returned none
    #[error("{0} returned no rows")]
    MissingRow(&'static str),
}

/// Handle to one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Creates a new client for the project at `base_url`
    ///
    /// The privileges of every call made through this handle are those of
    /// `api_key` (anon key or service-role key).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds an absolute URL for a path under the project base
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the project API key headers to a request
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}
