/// Object storage operations
///
/// Upload, public-URL computation, and removal against the platform's
/// `/storage/v1` service. Objects are addressed as `bucket/path`; TaskFlow
/// always writes under a generated path, never the client-supplied filename.

use super::client::{SupabaseClient, SupabaseError};

impl SupabaseClient {
    /// Uploads raw bytes to `bucket` under `path`
    ///
    /// Fails with `SupabaseError::Storage` if the store rejects the write
    /// (duplicate path, missing bucket, quota).
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<(), SupabaseError> {
        let endpoint = self.endpoint(&format!("storage/v1/object/{}/{}", bucket, path));

        let request = self
            .authorize(self.http().post(&endpoint))
            .header("Content-Type", "application/octet-stream")
            .body(bytes);

        let response = request.send().await.map_err(|source| {
            SupabaseError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Storage {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Returns the public URL for an object
    ///
    /// Purely local computation; the bucket must be public for the URL to
    /// resolve.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url(), bucket, path)
    }

    /// Removes an object from `bucket`
    pub async fn remove_object(&self, bucket: &str, path: &str) -> Result<(), SupabaseError> {
        let endpoint = self.endpoint(&format!("storage/v1/object/{}/{}", bucket, path));

        let request = self.authorize(self.http().delete(&endpoint));

        let response = request.send().await.map_err(|source| {
            SupabaseError::Transport {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Storage {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_shape() {
        let client = SupabaseClient::new("https://project.supabase.co", "key");

        assert_eq!(
            client.public_url("task-files", "abc.txt"),
            "https://project.supabase.co/storage/v1/object/public/task-files/abc.txt"
        );
    }
}
