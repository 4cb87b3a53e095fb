/// User projection and session token envelope
///
/// Users are owned and mutated exclusively by the auth service; TaskFlow only
/// reads them. `UserResponse` is the shape exposed over the API, built from
/// the provider's [`AuthUser`] record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::supabase::AuthUser;

/// User as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user ID (assigned by the auth service)
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        let full_name = user.full_name();

        Self {
            id: user.id,
            email: user.email,
            full_name,
            created_at: user.created_at,
        }
    }
}

/// Session token response returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Signed session token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,

    /// The authenticated user
    pub user: UserResponse,
}

impl Token {
    /// Wraps an access token and user projection
    pub fn bearer(access_token: String, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}
