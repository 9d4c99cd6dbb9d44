//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration shared by all motiondevelopment.top components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// API token from the motiondevelopment.top bot dashboard
    pub api_key: String,

    /// ID of the listed bot. [`crate::AutoPoster`] derives the ID from the
    /// live session instead and ignores this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,

    /// Base URL for the listing API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// How often the auto-poster reports the guild count
    #[serde(default = "default_post_interval", with = "duration_secs")]
    pub post_interval: Duration,
}

fn default_api_url() -> String {
    "https://motiondevelopment.top/api/v1.2/bots".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_post_interval() -> Duration {
    // 15 minutes, the interval the listing service expects
    Duration::from_secs(900)
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl MotionConfig {
    /// Create a configuration with the given API token.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the listed bot's ID.
    #[must_use]
    pub fn with_bot_id(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = Some(bot_id.into());
        self
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            bot_id: None,
            api_url: default_api_url(),
            timeout: default_timeout(),
            post_interval: default_post_interval(),
        }
    }
}
