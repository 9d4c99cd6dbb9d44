//! Error types and the shared classification policy.

use thiserror::Error;
use tracing::warn;

/// Errors returned by motiondevelopment.top components.
#[derive(Error, Debug)]
pub enum MotionError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The listing API returned an error, or an unknown failure was wrapped
    /// as one with status 500
    #[error("API error {status}: {message}")]
    Api { message: String, status: u16 },

    /// A required identifier is missing from the configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream answered with a non-success status and a plain message
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl MotionError {
    /// Missing API key, the one configuration failure the service models as
    /// an API error.
    pub(crate) fn missing_api_key() -> Self {
        Self::Api {
            message: "missing API key".into(),
            status: 400,
        }
    }

    /// Wrap a failure that is not already an API error as one with
    /// status 500, keeping the inner message visible.
    pub(crate) fn wrap_as_api(self, context: &str) -> Self {
        match self {
            api @ Self::Api { .. } => api,
            other => Self::Api {
                message: format!("{context}: {other}"),
                status: 500,
            },
        }
    }

    /// Check whether this is a typed API error.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// HTTP-like status code carried by API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for motiondevelopment.top operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Shared error policy: API errors surface to the caller, every other error
/// is logged once and swallowed into `Ok(None)`.
///
/// The asymmetry is deliberate and kept for compatibility with existing
/// consumers: a transport or parse failure in the info path resolves to
/// "no record" rather than an error.
pub fn filter_api_errors<T>(result: MotionResult<T>) -> MotionResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_api() => Err(err),
        Err(err) => {
            warn!(error = %err, "swallowing non-API error");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_pass_through_the_filter() {
        let result: MotionResult<()> = Err(MotionError::Api {
            message: "bad token".into(),
            status: 401,
        });
        let err = filter_api_errors(result).unwrap_err();
        match err {
            MotionError::Api { message, status } => {
                assert_eq!(message, "bad token");
                assert_eq!(status, 401);
            }
            _ => panic!("expected Api error, got {err:?}"),
        }
    }

    #[test]
    fn non_api_errors_are_swallowed() {
        let result: MotionResult<u32> = Err(MotionError::Upstream("boom".into()));
        assert_eq!(filter_api_errors(result).unwrap(), None);

        let result: MotionResult<u32> = Err(MotionError::Config("missing bot ID".into()));
        assert_eq!(filter_api_errors(result).unwrap(), None);
    }

    #[test]
    fn success_is_preserved() {
        let result: MotionResult<u32> = Ok(7);
        assert_eq!(filter_api_errors(result).unwrap(), Some(7));
    }

    #[test]
    fn wrap_keeps_existing_api_errors() {
        let err = MotionError::Api {
            message: "original".into(),
            status: 403,
        };
        match err.wrap_as_api("context") {
            MotionError::Api { message, status } => {
                assert_eq!(message, "original");
                assert_eq!(status, 403);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn wrap_converts_other_errors_to_api_500() {
        let err = MotionError::Upstream("service said no".into());
        match err.wrap_as_api("failed to check vote status") {
            MotionError::Api { message, status } => {
                assert_eq!(status, 500);
                assert!(message.contains("service said no"));
                assert!(message.contains("failed to check vote status"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn missing_api_key_is_a_400() {
        let err = MotionError::missing_api_key();
        assert!(err.is_api());
        assert_eq!(err.status(), Some(400));
    }
}
