use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::error::{body_preview, SeedError};

#[derive(Debug, Deserialize)]
pub struct IdentityName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Deserialize)]
pub struct IdentityLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct IdentityDob {
    pub date: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct IdentityCoordinates {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct IdentityLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub coordinates: IdentityCoordinates,
}

#[derive(Debug, Deserialize, Default)]
pub struct IdentityPicture {
    pub large: Option<String>,
}

/// One entry of the identity API's `results` array.
#[derive(Debug, Deserialize)]
pub struct Identity {
    pub gender: Option<String>,
    pub name: IdentityName,
    pub email: String,
    pub login: IdentityLogin,
    pub dob: IdentityDob,
    #[serde(default)]
    pub location: IdentityLocation,
    #[serde(default)]
    pub picture: IdentityPicture,
}

impl Identity {
    /// Coordinates as reported by the identity API, when both parse.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let coords = &self.location.coordinates;
        let lat = coords.latitude.as_deref()?.trim().parse::<f64>().ok()?;
        let lon = coords.longitude.as_deref()?.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

#[derive(Debug, Deserialize)]
struct IdentityResponse {
    results: Vec<Identity>,
}

/// Asks the identity API for `count` identities of the configured nationality.
pub async fn fetch_identities(
    client: &Client,
    config: &SeedConfig,
    count: usize,
) -> Result<Vec<Identity>, SeedError> {
    let results = count.to_string();
    let resp = client
        .get(&config.identity_api_url)
        .query(&[
            ("nat", config.nationality.as_str()),
            ("results", results.as_str()),
        ])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!("👤 Identity API returned {}", status);
        return Err(SeedError::Status {
            status: status.as_u16(),
            body: body_preview(&body, config.body_preview_len),
        });
    }

    let parsed: IdentityResponse = resp
        .json()
        .await
        .map_err(|e| SeedError::MalformedResponse(format!("identity api: {}", e)))?;

    if parsed.results.len() != count {
        return Err(SeedError::MalformedResponse(format!(
            "identity api returned {} identities, asked for {}",
            parsed.results.len(),
            count
        )));
    }

    info!("👤 Fetched {} identities", parsed.results.len());
    Ok(parsed.results)
}

/// Cuts an ISO-8601 timestamp down to its `YYYY-MM-DD` date.
pub fn reformat_birthdate(raw: &str) -> Option<String> {
    let date = raw.trim().split('T').next()?;
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    shaped.then(|| date.to_string())
}
