use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

use crate::config::SeedConfig;
use crate::error::{body_preview, SeedError};

#[derive(Debug, Deserialize)]
struct Geo {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LocationHit {
    lat: Option<f64>,
    lon: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "_geo")]
    geo: Option<Geo>,
}

impl LocationHit {
    fn coords(&self) -> Option<(f64, f64)> {
        let geo_lat = self.geo.as_ref().and_then(|g| g.lat);
        let geo_lng = self.geo.as_ref().and_then(|g| g.lng);
        let lat = geo_lat.or(self.lat).or(self.latitude)?;
        let lon = geo_lng.or(self.lon).or(self.longitude)?;
        Some((lat, lon))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Option<Vec<LocationHit>>,
}

/// Resolves city/country to coordinates, remembering answers for the rest of the run.
pub struct Geocoder<'a> {
    client: &'a Client,
    config: &'a SeedConfig,
    cache: HashMap<String, (f64, f64)>,
}

impl<'a> Geocoder<'a> {
    pub fn new(client: &'a Client, config: &'a SeedConfig) -> Self {
        Self {
            client,
            config,
            cache: HashMap::new(),
        }
    }

    pub async fn resolve(&mut self, city: &str, country: &str) -> Result<(f64, f64), SeedError> {
        let query = build_query(city, country);
        if query.is_empty() {
            return Err(SeedError::GeocodingUnavailable);
        }

        let cache_key = query.to_lowercase();
        if let Some(coords) = self.cache.get(&cache_key).copied() {
            return Ok(coords);
        }

        let coords = search_upstream(self.client, self.config, &query).await?;
        self.cache.insert(cache_key, coords);
        Ok(coords)
    }
}

async fn search_upstream(
    client: &Client,
    config: &SeedConfig,
    query: &str,
) -> Result<(f64, f64), SeedError> {
    let Some(base_url) = config.geocoding_api_url.as_deref() else {
        return Err(SeedError::GeocodingUnavailable);
    };
    let url = format!("{}/search", base_url.trim_end_matches('/'));

    let mut req = client.get(&url).query(&[("q", query), ("limit", "1")]);
    if let Some(key) = config.geocoding_api_key.as_deref() {
        req = req.header("x-api-key", key);
    }

    let resp = req.send().await.map_err(|e| {
        warn!("📍 Geocoder unreachable: {}", e);
        SeedError::Transport(e)
    })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!("📍 Geocoder non-OK for '{}': {}", query, status);
        return Err(SeedError::Status {
            status: status.as_u16(),
            body: body_preview(&body, config.body_preview_len),
        });
    }

    let parsed: SearchResponse = resp
        .json()
        .await
        .map_err(|e| SeedError::MalformedResponse(format!("geocoder: {}", e)))?;

    parsed
        .hits
        .unwrap_or_default()
        .iter()
        .find_map(LocationHit::coords)
        .ok_or(SeedError::GeocodingUnavailable)
}

fn build_query(city: &str, country: &str) -> String {
    [city.trim(), country.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
