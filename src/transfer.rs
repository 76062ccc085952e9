// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the remote conversion service.
//!
//! All network interaction goes through [`TransferClient`]. The base URL is
//! passed in at construction time; nothing in this module inspects the
//! environment. A conversion is a single multipart POST carrying the whole
//! file in a `file` field. There is no chunking, no retry, and no request
//! timeout: a row stays `Converting` until the endpoint answers.

use std::path::Path;

use crate::catalog::ConversionProfile;
use crate::error::TransferError;
use crate::queue::ResultHandle;

const USER_AGENT: &str = "IcedConvert/0.1.0";

/// Client for one conversion service instance.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TransferClient {
    client: reqwest::Client,
    base_url: String,
}

impl TransferClient {
    /// Builds a client for the given base URL. A trailing slash on the base
    /// URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransferError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransferError::Request(format!("failed to build HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves the endpoint for a profile:
    /// `{base_url}/api/{category}/{profile_id}`.
    pub fn endpoint_for(&self, profile: &ConversionProfile) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url,
            profile.category.as_str(),
            profile.id
        )
    }

    /// Uploads one source file and returns the converted payload.
    ///
    /// The source bytes are read from disk here, immediately before the
    /// upload; the queue only ever holds the path. A non-success response
    /// becomes [`TransferError::Status`] carrying the status text, matching
    /// what is shown on the failed row.
    pub async fn convert(
        &self,
        source: &Path,
        display_name: &str,
        profile: &ConversionProfile,
    ) -> Result<ResultHandle, TransferError> {
        let data = tokio::fs::read(source)
            .await
            .map_err(|e| TransferError::Source(e.to_string()))?;

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(display_name.to_owned())
            .mime_str("application/octet-stream")
            .map_err(|e| TransferError::Request(format!("invalid upload part: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint_for(profile))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransferError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransferError::Request(e.to_string()))?;

        Ok(ResultHandle::new(body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn new_builds_a_client() {
        assert!(TransferClient::new("http://localhost:8000").is_ok());
    }

    #[test]
    fn endpoint_joins_base_category_and_profile() {
        let client = TransferClient::new("http://localhost:8000").unwrap();
        let profile = catalog::find("jpg-to-png").unwrap();
        assert_eq!(
            client.endpoint_for(profile),
            "http://localhost:8000/api/images/jpg-to-png"
        );
    }

    #[test]
    fn endpoint_uses_documents_category_for_document_profiles() {
        let client = TransferClient::new("https://convert.example.com").unwrap();
        let profile = catalog::find("word-to-pdf").unwrap();
        assert_eq!(
            client.endpoint_for(profile),
            "https://convert.example.com/api/documents/word-to-pdf"
        );
    }

    #[test]
    fn trailing_slashes_on_base_url_are_stripped() {
        let client = TransferClient::new("http://localhost:8000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        let profile = catalog::find("pdf-to-word").unwrap();
        assert_eq!(
            client.endpoint_for(profile),
            "http://localhost:8000/api/documents/pdf-to-word"
        );
    }

    #[tokio::test]
    async fn convert_with_missing_source_fails_before_any_request() {
        let client = TransferClient::new("http://localhost:8000").unwrap();
        let profile = catalog::find("jpg-to-png").unwrap();
        let result = client
            .convert(
                Path::new("/nonexistent/path/photo.jpg"),
                "photo.jpg",
                profile,
            )
            .await;
        match result {
            Err(TransferError::Source(message)) => assert!(!message.is_empty()),
            other => panic!("expected Source error, got {:?}", other),
        }
    }
}
