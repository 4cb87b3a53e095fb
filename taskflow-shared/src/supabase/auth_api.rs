/// GoTrue auth operations
///
/// Sign-up, password sign-in, and admin user lookup against the platform's
/// `/auth/v1` service. TaskFlow never stores or verifies passwords itself;
/// it forwards credentials here and mints its own session token from the
/// identity that comes back.
///
/// `sign_up` and `sign_in_with_password` should be called on a client holding
/// the anon key; `admin_get_user` requires the service-role key.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::client::{SupabaseClient, SupabaseError};

/// User record as returned by the auth service
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    /// Unique user ID, assigned by the auth service
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Free-form metadata captured at sign-up (holds `full_name`)
    #[serde(default)]
    pub user_metadata: serde_json::Value,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl AuthUser {
    /// Display name from sign-up metadata, if one was provided
    pub fn full_name(&self) -> Option<String> {
        self.user_metadata
            .get("full_name")
            .and_then(|v| v.as_str())
            .map(String::from)
    }
}

impl SupabaseClient {
    /// Registers a new user with the auth service
    ///
    /// `full_name` is stored in the user's metadata. Returns the created
    /// user; rejection (duplicate email, weak password) surfaces as
    /// `SupabaseError::Auth` with the provider's status and message.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthUser, SupabaseError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = full_name {
            body["data"] = json!({ "full_name": name });
        }

        let endpoint = self.endpoint("auth/v1/signup");
        let value = self.auth_request(&endpoint, Some(body)).await?;
        Self::decode_user(value, &endpoint)
    }

    /// Verifies credentials via the password grant
    ///
    /// Returns the authenticated user on success. Invalid credentials come
    /// back as `SupabaseError::Auth` with a 4xx status.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, SupabaseError> {
        let endpoint = self.endpoint("auth/v1/token?grant_type=password");
        let body = json!({ "email": email, "password": password });

        let value = self.auth_request(&endpoint, Some(body)).await?;
        Self::decode_user(value, &endpoint)
    }

    /// Looks up a user by ID via the admin endpoint
    ///
    /// Requires a service-role client. A missing user surfaces as
    /// `SupabaseError::Auth` with status 404.
    pub async fn admin_get_user(&self, user_id: Uuid) -> Result<AuthUser, SupabaseError> {
        let endpoint = self.endpoint(&format!("auth/v1/admin/users/{}", user_id));

        let value = self.auth_request(&endpoint, None).await?;
        Self::decode_user(value, &endpoint)
    }

    /// Sends one request to the auth service and returns the JSON body
    async fn auth_request(
        &self,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, SupabaseError> {
        let mut request = match body {
            Some(ref body) => self.http().post(endpoint).json(body),
            None => self.http().get(endpoint),
        };
        request = self.authorize(request);

        let response = request.send().await.map_err(|source| {
            SupabaseError::Transport {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SupabaseError::Decode(format!("auth response from {}: {}", endpoint, e)))
    }

    /// Extracts the user record from an auth response
    ///
    /// GoTrue returns either the user object itself or a session wrapping it
    /// under a `user` key, depending on the endpoint and whether email
    /// confirmation is enabled.
    fn decode_user(value: serde_json::Value, endpoint: &str) -> Result<AuthUser, SupabaseError> {
        let user_value = match value.get("user") {
            Some(user) if user.is_object() => user.clone(),
            _ => value,
        };

        serde_json::from_value(user_value)
            .map_err(|e| SupabaseError::Decode(format!("user record from {}: {}", endpoint, e)))
    }
}
