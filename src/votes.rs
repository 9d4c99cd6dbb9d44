//! Vote-status lookup.

use reqwest::StatusCode;
use tracing::debug;

use crate::{
    api::{parse_error_message, MotionApiClient},
    config::MotionConfig,
    error::{MotionError, MotionResult},
};

/// Checks whether a user has voted for the bot on the listing site.
pub struct VoteChecker {
    api: MotionApiClient,
    bot_id: Option<String>,
}

impl VoteChecker {
    /// Create a new vote checker.
    pub fn new(config: &MotionConfig) -> MotionResult<Self> {
        Ok(Self {
            api: MotionApiClient::new(config)?,
            bot_id: config.bot_id.clone(),
        })
    }

    /// Override the base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.set_base_url(base_url);
        self
    }

    /// Check whether `user_id` has voted for the bot within the service's
    /// vote window.
    ///
    /// A 404 from the service means "has not voted" and yields `Ok(false)`.
    /// Any 2xx with a JSON body yields `Ok(true)` regardless of its content;
    /// a 2xx with an unparseable body is a failure, never a silent `true`.
    pub async fn has_voted(&self, user_id: &str) -> MotionResult<bool> {
        self.api.ensure_api_key()?;

        let bot_id = self
            .bot_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| MotionError::Config("missing bot ID".into()))?;

        if user_id.is_empty() {
            return Err(MotionError::Config("missing user ID".into()));
        }

        self.fetch_vote(bot_id, user_id)
            .await
            .map_err(|err| err.wrap_as_api("failed to check vote status"))
    }

    async fn fetch_vote(&self, bot_id: &str, user_id: &str) -> MotionResult<bool> {
        let response = self
            .api
            .get(&format!("/{bot_id}/votes/{user_id}"))
            .await?;

        let status = response.status();

        // The service answers 404 for "no vote recorded", not for a missing
        // resource.
        if status == StatusCode::NOT_FOUND {
            debug!(user_id, "No vote recorded");
            return Ok(false);
        }

        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(MotionError::Upstream(parse_error_message(status, &bytes)));
        }

        // The vote payload content is irrelevant, but it must at least be
        // valid JSON.
        let bytes = response.bytes().await?;
        serde_json::from_slice::<serde_json::Value>(&bytes)?;

        debug!(user_id, "Vote recorded");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn setup(api_key: &str, bot_id: Option<&str>) -> (MockServer, VoteChecker) {
        let mock_server = MockServer::start().await;
        let mut config = MotionConfig::new(api_key);
        config.bot_id = bot_id.map(Into::into);
        let checker = VoteChecker::new(&config)
            .unwrap()
            .with_base_url(mock_server.uri());
        (mock_server, checker)
    }

    #[tokio::test]
    async fn recorded_vote_yields_true() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .and(path("/12345/votes/999"))
            .and(header("key", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "voted": true,
                "expires": 1_700_000_000
            })))
            .mount(&mock_server)
            .await;

        assert!(checker.has_voted("999").await.unwrap());
    }

    #[tokio::test]
    async fn not_found_means_no_vote() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .and(path("/12345/votes/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "no vote found"
            })))
            .mount(&mock_server)
            .await;

        assert!(!checker.has_voted("999").await.unwrap());
    }

    #[tokio::test]
    async fn upstream_failure_carries_the_service_message() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .and(path("/12345/votes/999"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "bot not approved"
            })))
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("999").await.unwrap_err();
        match err {
            MotionError::Api { message, status } => {
                assert_eq!(status, 500);
                assert!(message.contains("bot not approved"));
            }
            _ => panic!("expected Api error, got {err:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_status_text() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .and(path("/12345/votes/999"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("999").await.unwrap_err();
        match err {
            MotionError::Api { message, status } => {
                assert_eq!(status, 500);
                assert!(message.contains("Service Unavailable"));
            }
            _ => panic!("expected Api error, got {err:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_success_body_is_a_failure() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .and(path("/12345/votes/999"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("999").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let (mock_server, checker) = setup("", Some("12345")).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("999").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn missing_bot_id_fails_before_any_request() {
        let (mock_server, checker) = setup("test_key", None).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("999").await.unwrap_err();
        assert!(matches!(err, MotionError::Config(_)));
    }

    #[tokio::test]
    async fn missing_user_id_fails_before_any_request() {
        let (mock_server, checker) = setup("test_key", Some("12345")).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = checker.has_voted("").await.unwrap_err();
        assert!(matches!(err, MotionError::Config(_)));
    }
}
