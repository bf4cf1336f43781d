use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::error::{body_preview, SeedError};
use crate::models::UserRecord;

/// `POST /auth/signup` with the whole record. Any 2xx counts as registered.
pub async fn signup(
    client: &Client,
    config: &SeedConfig,
    user: &UserRecord,
) -> Result<u16, SeedError> {
    let resp = client
        .post(config.endpoint("/auth/signup"))
        .json(user)
        .send()
        .await?;

    let status = resp.status();
    info!("📝 Signup status for {}: {}", user.username, status.as_u16());
    if status.is_success() {
        return Ok(status.as_u16());
    }

    let body = resp.text().await.unwrap_or_default();
    let body = body_preview(&body, config.body_preview_len);
    if status.as_u16() >= 400 {
        warn!("📝 Signup response for {}: {}", user.username, body);
    }
    Err(SeedError::Status {
        status: status.as_u16(),
        body,
    })
}

/// `POST /auth/signin` with the record's credentials, returning the bearer token.
pub async fn signin(
    client: &Client,
    config: &SeedConfig,
    user: &UserRecord,
) -> Result<String, SeedError> {
    let resp = client
        .post(config.endpoint("/auth/signin"))
        .json(&json!({
            "email": user.email,
            "password": user.password,
        }))
        .send()
        .await?;

    let status = resp.status();
    let body_text = resp.text().await?;

    if status != StatusCode::OK {
        return Err(SeedError::Status {
            status: status.as_u16(),
            body: body_preview(&body_text, config.body_preview_len),
        });
    }

    let body: Value = serde_json::from_str(&body_text)
        .map_err(|e| SeedError::MalformedResponse(format!("signin body: {}", e)))?;

    match body.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(SeedError::MissingToken),
    }
}
