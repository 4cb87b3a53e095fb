/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. Everything is read once at startup and
/// never mutated afterwards.
///
/// # Environment Variables
///
/// - `SUPABASE_URL`: Base URL of the Supabase project (required)
/// - `SUPABASE_ANON_KEY`: Anon API key, used for signup/login (required)
/// - `SUPABASE_SERVICE_KEY`: Service-role key, used for tables/storage/admin (required)
/// - `STORAGE_BUCKET`: Object storage bucket for attachments (default: task-files)
/// - `JWT_SECRET`: Secret key for session token signing (required, >= 32 chars)
/// - `JWT_EXPIRATION_SECS`: Session token lifetime (default: 3600)
/// - `CORS_ORIGINS`: Comma-separated origin allow-list (default: http://localhost:3000)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8000)
///
/// # Example
///
/// ```no_run
/// use taskflow_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Supabase platform configuration
    pub supabase: SupabaseConfig,

    /// Session token configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// CORS origin allow-list ("*" enables permissive CORS)
    pub cors_origins: Vec<String>,
}

/// Supabase platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL
    pub url: String,

    /// Anon API key (signup/login)
    pub anon_key: String,

    /// Service-role API key (tables, storage, admin lookups)
    pub service_key: String,

    /// Storage bucket holding task attachments
    pub storage_bucket: String,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// Must be at least 32 characters. Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Token lifetime in seconds
    pub expiration_secs: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing, values fail to
    /// parse, or the JWT secret is too short.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let url = env::var("SUPABASE_URL")
            .map_err(|_| anyhow::anyhow!("SUPABASE_URL environment variable is required"))?;
        let anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable is required"))?;
        let service_key = env::var("SUPABASE_SERVICE_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_SERVICE_KEY environment variable is required"))?;
        let storage_bucket =
            env::var("STORAGE_BUCKET").unwrap_or_else(|_| "task-files".to_string());

        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let expiration_secs = env::var("JWT_EXPIRATION_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
            },
            supabase: SupabaseConfig {
                url,
                anon_key,
                service_key,
                storage_bucket,
            },
            jwt: JwtConfig {
                secret,
                expiration_secs,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            supabase: SupabaseConfig {
                url: "http://localhost:54321".to_string(),
                anon_key: "anon".to_string(),
                service_key: "service".to_string(),
                storage_bucket: "task-files".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                expiration_secs: 3600,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        let config = test_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }
}
