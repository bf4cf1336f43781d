use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::SeedConfig;
use crate::error::{body_preview, SeedError};
use crate::models::{ProfilePayload, UserRecord};
use crate::services::fallback_service;

pub const INTERESTS: [&str; 16] = [
    "#vegan",
    "#geek",
    "#piercing",
    "#travel",
    "#music",
    "#sport",
    "#cooking",
    "#gaming",
    "#art",
    "#photography",
    "#hiking",
    "#reading",
    "#cinema",
    "#dance",
    "#yoga",
    "#tattoo",
];

/// The profile form accepts at most this many tags.
pub const MAX_INTERESTS: usize = 5;

pub const SEXUAL_PREFERENCES: [&str; 3] = ["male", "female", "non-binary"];

const BIO_OPENERS: [&str; 4] = [
    "Hi, I'm {name} from {city}.",
    "{name} here, living in {city}.",
    "Hello from {city}! I'm {name}.",
    "Just {name}, somewhere around {city}.",
];

/// Builds the profile for one record, filling gaps with random defaults.
pub fn build_profile<R: Rng + ?Sized>(
    user: &UserRecord,
    config: &SeedConfig,
    rng: &mut R,
) -> ProfilePayload {
    let gender = user
        .gender
        .clone()
        .unwrap_or_else(|| fallback_service::random_gender(rng));
    let location = user
        .location
        .clone()
        .unwrap_or_else(|| fallback_service::random_location(&config.fallback_cities, rng));
    let pictures = user
        .pictures
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| fallback_service::gallery_urls(&gender, rng));
    let profile_picture = user
        .picture
        .clone()
        .or_else(|| pictures.first().cloned())
        .unwrap_or_else(|| fallback_service::portrait_url(&gender, 0));

    let interests = sample(&INTERESTS, 1, MAX_INTERESTS, rng);
    let sexual_preferences = sample(&SEXUAL_PREFERENCES, 1, SEXUAL_PREFERENCES.len(), rng);
    let biography = biography(&user.firstname, &location.city, &interests, rng);

    ProfilePayload {
        gender,
        sexual_preferences,
        biography,
        interests,
        authorize_location: true,
        location,
        pictures,
        profile_picture,
    }
}

fn sample<R: Rng + ?Sized>(pool: &[&str], min: usize, max: usize, rng: &mut R) -> Vec<String> {
    let n = rng.gen_range(min..=max.min(pool.len()));
    pool.choose_multiple(rng, n).map(|s| s.to_string()).collect()
}

fn biography<R: Rng + ?Sized>(
    name: &str,
    city: &str,
    interests: &[String],
    rng: &mut R,
) -> String {
    let opener = BIO_OPENERS
        .choose(rng)
        .copied()
        .unwrap_or(BIO_OPENERS[0])
        .replace("{name}", name)
        .replace("{city}", city);

    let tags: Vec<&str> = interests
        .iter()
        .map(|i| i.trim_start_matches('#'))
        .collect();
    match tags.as_slice() {
        [] => opener,
        [only] => format!("{} I'm really into {}.", opener, only),
        [rest @ .., last] => format!("{} I love {} and {}.", opener, rest.join(", "), last),
    }
}

/// `PUT /users/profile` as form data, authorized with the record's token.
pub async fn update_profile(
    client: &Client,
    config: &SeedConfig,
    username: &str,
    token: &str,
    payload: &ProfilePayload,
) -> Result<u16, SeedError> {
    let fields = payload.to_form_fields()?;

    let resp = client
        .put(config.endpoint("/users/profile"))
        .bearer_auth(token)
        .form(&fields)
        .send()
        .await?;

    let status = resp.status();
    info!("🧑 Profile update for {}: {}", username, status.as_u16());
    if status.is_success() {
        return Ok(status.as_u16());
    }

    let body = resp.text().await.unwrap_or_default();
    let body = body_preview(&body, config.body_preview_len);
    warn!("🧑 Profile update response for {}: {}", username, body);
    Err(SeedError::Status {
        status: status.as_u16(),
        body,
    })
}
