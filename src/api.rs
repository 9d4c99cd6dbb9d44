//! Shared REST layer for the listing API.

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::MotionConfig,
    error::{MotionError, MotionResult},
};

/// Thin reqwest wrapper that owns the base URL and credentials.
///
/// Response interpretation is left to the calling component; each endpoint
/// has its own status policy.
#[derive(Debug, Clone)]
pub(crate) struct MotionApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MotionApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &MotionConfig) -> MotionResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("motiondev/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MotionError::Http)?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Override the base URL (for testing).
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        let url: String = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
    }

    /// Fail with a 400 API error when no API key is configured. Runs before
    /// any request is sent.
    pub fn ensure_api_key(&self) -> MotionResult<()> {
        if self.api_key.is_empty() {
            return Err(MotionError::missing_api_key());
        }
        Ok(())
    }

    /// Make a GET request with the `key` header attached.
    #[instrument(skip(self))]
    pub async fn get(&self, endpoint: &str) -> MotionResult<Response> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, "Making listing API request");

        let response = self
            .client
            .get(&url)
            .header("key", &self.api_key)
            .send()
            .await?;
        Ok(response)
    }

    /// Make a POST request with a JSON body and the `key` header attached.
    #[instrument(skip(self, body))]
    pub async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> MotionResult<Response> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, "Making listing API request");

        let response = self
            .client
            .post(&url)
            .header("key", &self.api_key)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }
}

/// Extract the `message` field from an error body, falling back to the HTTP
/// status text when the body is not the expected JSON shape.
pub(crate) fn parse_error_message(status: StatusCode, bytes: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_slice::<ErrorBody>(bytes)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_prefers_the_body() {
        let message = parse_error_message(
            StatusCode::FORBIDDEN,
            br#"{"message":"invalid token"}"#,
        );
        assert_eq!(message, "invalid token");
    }

    #[test]
    fn parse_error_message_falls_back_to_status_text() {
        let message = parse_error_message(StatusCode::FORBIDDEN, b"<html>nope</html>");
        assert_eq!(message, "Forbidden");
    }

    #[test]
    fn ensure_api_key_rejects_an_empty_key() {
        let client = MotionApiClient::new(&MotionConfig::new("")).unwrap();
        let err = client.ensure_api_key().unwrap_err();
        assert!(err.is_api());
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn ensure_api_key_accepts_a_key() {
        let client = MotionApiClient::new(&MotionConfig::new("token")).unwrap();
        assert!(client.ensure_api_key().is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = MotionConfig::new("token");
        config.api_url = "https://example.test/api/".into();
        let mut client = MotionApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://example.test/api");

        client.set_base_url("http://127.0.0.1:9/");
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }
}
