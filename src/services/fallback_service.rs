use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::FallbackCity;
use crate::models::{Location, UserRecord};

pub const GENDERS: [&str; 2] = ["male", "female"];

/// Extra pictures attached to every generated user on top of the main one.
pub const GALLERY_SIZE: usize = 4;

pub fn random_gender<R: Rng + ?Sized>(rng: &mut R) -> String {
    GENDERS.choose(rng).copied().unwrap_or("male").to_string()
}

/// Picks a city from the fixed set. Falls back to Paris when the set is empty.
pub fn random_location<R: Rng + ?Sized>(cities: &[FallbackCity], rng: &mut R) -> Location {
    match cities.choose(rng) {
        Some(c) => Location {
            latitude: c.latitude,
            longitude: c.longitude,
            country: c.country.clone(),
            city: c.city.clone(),
        },
        None => Location {
            latitude: 48.8566,
            longitude: 2.3522,
            country: "France".to_string(),
            city: "Paris".to_string(),
        },
    }
}

/// Portrait URL on the identity provider's image host, bucketed by gender.
pub fn portrait_url(gender: &str, index: u8) -> String {
    let bucket = if gender.eq_ignore_ascii_case("female") {
        "women"
    } else {
        "men"
    };
    format!(
        "https://randomuser.me/api/portraits/{}/{}.jpg",
        bucket,
        index % 100
    )
}

pub fn gallery_urls<R: Rng + ?Sized>(gender: &str, rng: &mut R) -> Vec<String> {
    (0..GALLERY_SIZE)
        .map(|_| portrait_url(gender, rng.gen_range(0..100)))
        .collect()
}

/// Synthesizes `count` users with templated identities. Only gender, city and
/// pictures are random.
pub fn fallback_users<R: Rng + ?Sized>(
    count: usize,
    cities: &[FallbackCity],
    rng: &mut R,
) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let gender = random_gender(rng);
            let location = random_location(cities, rng);
            let picture = portrait_url(&gender, rng.gen_range(0..100));
            let pictures = gallery_urls(&gender, rng);

            UserRecord {
                firstname: format!("User{}", i),
                lastname: format!("Lastname{}", i),
                username: format!("username{}", i),
                email: format!("user{}@example.com", i),
                password: format!("Password{}!", i),
                birthdate: fallback_birthdate(i),
                gender: Some(gender),
                location: Some(location),
                picture: Some(picture),
                pictures: Some(pictures),
                token: None,
            }
        })
        .collect()
}

fn fallback_birthdate(i: usize) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        1980 + (i % 25),
        1 + (i % 12),
        1 + (i % 28)
    )
}
