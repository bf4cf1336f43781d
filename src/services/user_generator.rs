use rand::Rng;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::SeedConfig;
use crate::models::{Location, UserRecord, UserSource};
use crate::services::fallback_service;
use crate::services::identity_service::{self, Identity};
use crate::services::location_service::Geocoder;

const DEFAULT_BIRTHDATE: &str = "2000-01-01";

/// Produces exactly `count` users: from the identity API when enabled and
/// reachable, otherwise from the fallback generator.
pub async fn generate_users<R: Rng + ?Sized>(
    client: &Client,
    config: &SeedConfig,
    count: usize,
    rng: &mut R,
) -> (Vec<UserRecord>, UserSource) {
    if !config.use_identity_api {
        info!("👤 Identity API disabled, generating {} template users", count);
        return (
            fallback_service::fallback_users(count, &config.fallback_cities, rng),
            UserSource::Fallback,
        );
    }

    let identities = match identity_service::fetch_identities(client, config, count).await {
        Ok(identities) => identities,
        Err(e) => {
            warn!("👤 Identity API unusable ({}), falling back to template users", e);
            return (
                fallback_service::fallback_users(count, &config.fallback_cities, rng),
                UserSource::Fallback,
            );
        }
    };

    let mut geocoder = Geocoder::new(client, config);
    let mut users = Vec::with_capacity(identities.len());
    for identity in identities {
        let location = resolve_location(&mut geocoder, &identity, config, rng).await;
        users.push(identity_to_record(identity, location, rng));
    }

    (users, UserSource::IdentityApi)
}

// Geocoder first, then the identity's own coordinates, then a fallback city.
async fn resolve_location<R: Rng + ?Sized>(
    geocoder: &mut Geocoder<'_>,
    identity: &Identity,
    config: &SeedConfig,
    rng: &mut R,
) -> Location {
    let city = identity.location.city.trim();
    let country = identity.location.country.trim();

    let coords = match geocoder.resolve(city, country).await {
        Ok(coords) => Some(coords),
        Err(e) => {
            if config.geocoding_api_url.is_some() {
                warn!(
                    "📍 Geocoding '{}, {}' for {} failed: {}",
                    city, country, identity.login.username, e
                );
            } else {
                debug!(
                    "📍 No geocoder for {} ({}), using identity coordinates",
                    identity.login.username, e
                );
            }
            identity.coordinates()
        }
    };

    match coords {
        Some((latitude, longitude)) if !city.is_empty() => Location {
            latitude,
            longitude,
            country: country.to_string(),
            city: city.to_string(),
        },
        _ => {
            warn!(
                "📍 No usable location for {}, using a fallback city",
                identity.login.username
            );
            fallback_service::random_location(&config.fallback_cities, rng)
        }
    }
}

pub fn identity_to_record<R: Rng + ?Sized>(
    identity: Identity,
    location: Location,
    rng: &mut R,
) -> UserRecord {
    let birthdate = identity_service::reformat_birthdate(&identity.dob.date).unwrap_or_else(|| {
        warn!(
            "👤 Unreadable birthdate '{}' for {}",
            identity.dob.date, identity.login.username
        );
        DEFAULT_BIRTHDATE.to_string()
    });

    let gender = identity
        .gender
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| fallback_service::random_gender(rng));
    let pictures = fallback_service::gallery_urls(&gender, rng);
    let picture = identity
        .picture
        .large
        .filter(|p| !p.trim().is_empty())
        .or_else(|| pictures.first().cloned());

    UserRecord {
        firstname: identity.name.first,
        lastname: identity.name.last,
        username: identity.login.username,
        email: identity.email,
        password: identity.login.password,
        birthdate,
        gender: Some(gender),
        location: Some(location),
        picture,
        pictures: Some(pictures),
        token: None,
    }
}
