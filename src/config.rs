use std::env;
use std::time::Duration;

/// A city the fallback generator can place users in.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackCity {
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FallbackCity {
    pub fn new(city: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
        }
    }
}

/// Everything the seeding pipeline needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Base URL of the application being seeded, without trailing slash.
    pub api_base_url: String,
    pub user_count: usize,
    pub use_identity_api: bool,
    pub identity_api_url: String,
    /// Nationality code passed to the identity API (`nat=`).
    pub nationality: String,
    pub geocoding_api_url: Option<String>,
    pub geocoding_api_key: Option<String>,
    /// Pause between the signup pass and the signin pass.
    pub signup_settle_delay: Duration,
    /// Number of characters of an error body kept in logs and outcomes.
    pub body_preview_len: usize,
    pub rng_seed: Option<u64>,
    pub fallback_cities: Vec<FallbackCity>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            user_count: 10,
            use_identity_api: true,
            identity_api_url: "https://randomuser.me/api/".to_string(),
            nationality: "fr".to_string(),
            geocoding_api_url: None,
            geocoding_api_key: None,
            signup_settle_delay: Duration::from_millis(1000),
            body_preview_len: 100,
            rng_seed: None,
            fallback_cities: default_fallback_cities(),
        }
    }
}

impl SeedConfig {
    /// Reads `SEED_*` variables, keeping the default for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base_url = env::var("SEED_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        let user_count = parse_var("SEED_USER_COUNT").unwrap_or(defaults.user_count);
        let use_identity_api = env::var("SEED_USE_IDENTITY_API")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.use_identity_api);
        let identity_api_url =
            env::var("SEED_IDENTITY_API_URL").unwrap_or(defaults.identity_api_url);
        let nationality = env::var("SEED_NATIONALITY").unwrap_or(defaults.nationality);
        let geocoding_api_url = env::var("SEED_GEOCODING_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let geocoding_api_key = env::var("SEED_GEOCODING_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let signup_settle_delay = parse_var::<u64>("SEED_SIGNUP_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.signup_settle_delay);
        let body_preview_len = parse_var("SEED_BODY_PREVIEW").unwrap_or(defaults.body_preview_len);
        let rng_seed = parse_var("SEED_RNG_SEED");

        Self {
            api_base_url,
            user_count,
            use_identity_api,
            identity_api_url,
            nationality,
            geocoding_api_url,
            geocoding_api_key,
            signup_settle_delay,
            body_preview_len,
            rng_seed,
            fallback_cities: defaults.fallback_cities,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn default_fallback_cities() -> Vec<FallbackCity> {
    vec![
        FallbackCity::new("Paris", "France", 48.8566, 2.3522),
        FallbackCity::new("Lyon", "France", 45.7640, 4.8357),
        FallbackCity::new("Marseille", "France", 43.2965, 5.3698),
        FallbackCity::new("Toulouse", "France", 43.6047, 1.4442),
        FallbackCity::new("Nice", "France", 43.7102, 7.2620),
        FallbackCity::new("Bordeaux", "France", 44.8378, -0.5792),
        FallbackCity::new("Lille", "France", 50.6292, 3.0573),
        FallbackCity::new("Nantes", "France", 47.2184, -1.5536),
    ]
}
