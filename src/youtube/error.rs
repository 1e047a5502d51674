use thiserror::Error;

/// Failures of the YouTube Data API client.
///
/// `ConfigurationMissing` is a routing signal rather than a fault: callers
/// switch to their fallback path when they see it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("YouTube API key not configured")]
    ConfigurationMissing,

    #[error("YouTube API error (403): {}", forbidden_guidance(.message.as_deref()))]
    UpstreamAuth { message: Option<String> },

    #[error(
        "YouTube API error (400): invalid request, check your API key format and query parameters{}",
        detail(.message.as_deref())
    )]
    UpstreamBadRequest { message: Option<String> },

    #[error(
        "YouTube API error (429): rate limited, too many requests or the daily quota is used up{}",
        detail(.message.as_deref())
    )]
    UpstreamRateLimited { message: Option<String> },

    #[error("YouTube API error ({status}): {reason}{}", detail(.message.as_deref()))]
    UpstreamUnknown {
        status: u16,
        reason: String,
        message: Option<String>,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, ApiError::ConfigurationMissing)
    }

    /// Message reported by the upstream service, if any
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            ApiError::UpstreamAuth { message }
            | ApiError::UpstreamBadRequest { message }
            | ApiError::UpstreamRateLimited { message }
            | ApiError::UpstreamUnknown { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UpstreamAuth { .. } => Some(403),
            ApiError::UpstreamBadRequest { .. } => Some(400),
            ApiError::UpstreamRateLimited { .. } => Some(429),
            ApiError::UpstreamUnknown { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn detail(message: Option<&str>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(" - {m}"),
        _ => String::new(),
    }
}

/// Explain a 403 from the upstream message text
fn forbidden_guidance(message: Option<&str>) -> String {
    let text = message.unwrap_or_default();
    let lower = text.to_lowercase();

    let hint = if lower.contains("quota") {
        "daily quota exceeded, wait for the quota to reset or raise it in the Google Cloud console"
    } else if lower.contains("api key not valid") || lower.contains("keyinvalid") {
        "the API key is not valid, check that it was copied correctly"
    } else if lower.contains("has not been used") || lower.contains("disabled") {
        "YouTube Data API v3 is not enabled for this project"
    } else if lower.contains("referer") || lower.contains("restrict") || lower.contains("blocked") {
        "the API key's restrictions block this request"
    } else {
        "access forbidden, check the API key and its quota"
    };

    format!("{hint}{}", detail(message))
}

/// Map a non-success HTTP response to the matching error variant.
pub fn classify_response(status: u16, reason: &str, body: &str) -> ApiError {
    let message = upstream_message(body);
    match status {
        403 => ApiError::UpstreamAuth { message },
        400 => ApiError::UpstreamBadRequest { message },
        429 => ApiError::UpstreamRateLimited { message },
        _ => ApiError::UpstreamUnknown {
            status,
            reason: reason.to_string(),
            message,
        },
    }
}

/// Pull `error.message` (or a top-level `message`) out of an error body
fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
