use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("response carried no token")]
    MissingToken,

    #[error("no coordinates available")]
    GeocodingUnavailable,

    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SeedError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SeedError::Status { status, .. } => Some(*status),
            SeedError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Keeps at most `max` characters of a response body for logging.
pub fn body_preview(body: &str, max: usize) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}
