//! Bot metadata retrieval.

use tracing::debug;

use crate::{
    api::MotionApiClient,
    config::MotionConfig,
    error::{filter_api_errors, MotionError, MotionResult},
    types::{BotInfo, BotPayload},
};

/// Retrieves the bot's listing record.
pub struct InfoFetcher {
    api: MotionApiClient,
    bot_id: Option<String>,
}

impl InfoFetcher {
    /// Create a new info fetcher.
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

    /// Fetch the bot's listing record, normalized per field.
    ///
    /// Only API errors surface as `Err`; any other failure (transport,
    /// unparseable body, upstream rejection) is logged and resolves to
    /// `Ok(None)` through [`filter_api_errors`].
    pub async fn get_bot_info(&self) -> MotionResult<Option<BotInfo>> {
        self.api.ensure_api_key()?;

        let bot_id = self
            .bot_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| MotionError::Config("missing bot ID".into()))?;

        filter_api_errors(self.fetch_info(bot_id).await)
    }

    async fn fetch_info(&self, bot_id: &str) -> MotionResult<BotInfo> {
        let response = self.api.get(&format!("/{bot_id}")).await?;

        if !response.status().is_success() {
            return Err(MotionError::Upstream(
                "failed to retrieve bot information".into(),
            ));
        }

        let bytes = response.bytes().await?;
        let payload: BotPayload = serde_json::from_slice(&bytes)?;

        debug!(bot_id, "Retrieved bot information");
        Ok(BotInfo::from(payload))
    }
}
