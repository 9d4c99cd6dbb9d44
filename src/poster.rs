//! Periodic guild-count reporting.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{
    api::MotionApiClient,
    config::MotionConfig,
    error::{MotionError, MotionResult},
    types::StatsBody,
};

/// Live view of the bot's connection to Discord.
///
/// Both values are sampled at call time so a report always reflects the
/// current session, never a cached snapshot.
pub trait BotSession: Send + Sync + 'static {
    /// The authenticated bot user's ID.
    fn bot_id(&self) -> String;

    /// Number of guilds the bot is currently in.
    fn guild_count(&self) -> u64;
}

/// Reports the bot's guild count to the listing service.
///
/// One report fires when the connection signals ready, then one per
/// interval (15 minutes by default) for as long as the task runs. Failed
/// reports are logged and wait for the next tick; there are no retries.
pub struct AutoPoster {
    api: MotionApiClient,
    session: Arc<dyn BotSession>,
    post_interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl AutoPoster {
    /// Create a new auto-poster for the given session.
    pub fn new(config: &MotionConfig, session: Arc<dyn BotSession>) -> MotionResult<Self> {
        Ok(Self {
            api: MotionApiClient::new(config)?,
            session,
            post_interval: config.post_interval,
            task: None,
        })
    }

    /// Override the base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.set_base_url(base_url);
        self
    }

    /// Post the current guild count once.
    ///
    /// Fails with a 400 API error when no API key is configured, before any
    /// request is sent. Upstream rejections carry the service's message and
    /// status; transport and parse failures are wrapped as a 500 API error.
    pub async fn post_guild_count(&self) -> MotionResult<()> {
        Self::post(&self.api, self.session.as_ref()).await
    }

    /// Start the reporting task: one report when `ready` flips to true, then
    /// one per interval. The task is owned; it stops on [`Self::stop`] or
    /// when the poster is dropped.
    pub fn start(&mut self, mut ready: watch::Receiver<bool>) {
        if self.task.is_some() {
            return;
        }

        let api = self.api.clone();
        let session = Arc::clone(&self.session);
        let period = self.post_interval;

        let task = tokio::spawn(async move {
            // No connection will ever come up if the sender is gone.
            if ready.wait_for(|ready| *ready).await.is_err() {
                debug!("Ready signal dropped before firing, reporter exiting");
                return;
            }

            match Self::post(&api, session.as_ref()).await {
                Ok(()) => info!("Posted guild count"),
                Err(err) => error!(error = %err, "Failed to post guild count"),
            }

            let mut timer = tokio::time::interval(period);
            // Skip the first tick which fires immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                if let Err(err) = Self::post(&api, session.as_ref()).await {
                    error!(error = %err, "Failed to post guild count");
                }
            }
        });

        self.task = Some(task);
    }

    /// Stop the reporting task, if running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether the reporting task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    async fn post(api: &MotionApiClient, session: &dyn BotSession) -> MotionResult<()> {
        api.ensure_api_key()?;

        let bot_id = session.bot_id();
        let guilds = session.guild_count();

        Self::send_stats(api, &bot_id, guilds)
            .await
            .map_err(|err| err.wrap_as_api("failed to post guild count"))
    }

    async fn send_stats(api: &MotionApiClient, bot_id: &str, guilds: u64) -> MotionResult<()> {
        let response = api
            .post_json(&format!("/{bot_id}/stats"), &StatsBody { guilds })
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(bot_id, guilds, "Posted guild count");
            return Ok(());
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        let bytes = response.bytes().await?;
        let body: ErrorBody = serde_json::from_slice(&bytes)?;
        Err(MotionError::Api {
            message: body.message,
            status: status.as_u16(),
        })
    }
}

impl Drop for AutoPoster {
    fn drop(&mut self) {
        self.stop();
    }
}
