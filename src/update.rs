//! Release check against crates.io.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{MotionError, MotionResult};

const REGISTRY_URL: &str = "https://crates.io";

/// Compare the built version against the latest release on crates.io.
///
/// Logs an upgrade notice and returns the registry version when a different
/// release is available. Registry failures are logged and swallowed; the
/// check is informational only.
pub async fn check_for_updates() -> MotionResult<Option<String>> {
    check_for_updates_at(REGISTRY_URL).await
}

async fn check_for_updates_at(base_url: &str) -> MotionResult<Option<String>> {
    match fetch_latest_version(base_url).await {
        Ok(latest) => {
            let current = env!("CARGO_PKG_VERSION");
            if latest == current {
                debug!(version = current, "Running the latest release");
                Ok(None)
            } else {
                info!(
                    current,
                    latest, "A newer motiondev release is available on crates.io"
                );
                Ok(Some(latest))
            }
        }
        Err(err) => {
            warn!(error = %err, "Release check failed");
            Ok(None)
        }
    }
}

async fn fetch_latest_version(base_url: &str) -> MotionResult<String> {
    #[derive(Deserialize)]
    struct CrateResponse {
        #[serde(rename = "crate")]
        krate: CrateMeta,
    }

    #[derive(Deserialize)]
    struct CrateMeta {
        max_version: String,
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(format!("motiondev/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(MotionError::Http)?;

    let url = format!("{base_url}/api/v1/crates/{}", env!("CARGO_PKG_NAME"));
    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(MotionError::Upstream(format!(
            "registry answered {}",
            response.status()
        )));
    }

    let body: CrateResponse = response.json().await?;
    Ok(body.krate.max_version)
}
