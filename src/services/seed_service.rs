use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use tracing::{error, info, warn};

use crate::config::SeedConfig;
use crate::error::SeedError;
use crate::models::{ProfileOutcome, RecordReport, SeedReport, StepResult, UserRecord};
use crate::services::{auth_service, profile_service, user_generator};

/// Registers every user, one after the other, then waits for the server to settle.
pub async fn register_users(
    client: &Client,
    config: &SeedConfig,
    users: &[UserRecord],
) -> Vec<StepResult> {
    let mut results = Vec::with_capacity(users.len());
    for user in users {
        let result = auth_service::signup(client, config, user).await;
        if let Err(SeedError::Transport(e)) = &result {
            error!("📝 Error signing up {}: {}", user.username, e);
        }
        results.push(result);
    }

    if !config.signup_settle_delay.is_zero() {
        tokio::time::sleep(config.signup_settle_delay).await;
    }
    results
}

/// Signs every user in and stores the returned token on the record.
pub async fn authenticate_users(
    client: &Client,
    config: &SeedConfig,
    users: &mut [UserRecord],
) -> Vec<StepResult> {
    let mut results = Vec::with_capacity(users.len());
    for user in users.iter_mut() {
        let result = match auth_service::signin(client, config, user).await {
            Ok(token) => {
                user.token = Some(token);
                info!("🔐 Signed in {}", user.username);
                Ok(200)
            }
            Err(e) => {
                match &e {
                    SeedError::Transport(_) => error!("🔐 Error signing in {}: {}", user.username, e),
                    _ => warn!("🔐 Failed to sign in {}: {}", user.username, e),
                }
                Err(e)
            }
        };
        results.push(result);
    }
    results
}

/// Sends a profile for every user holding a token. Users without one are skipped.
pub async fn populate_profiles<R: Rng + ?Sized>(
    client: &Client,
    config: &SeedConfig,
    users: &[UserRecord],
    rng: &mut R,
) -> Vec<ProfileOutcome> {
    let mut outcomes = Vec::with_capacity(users.len());
    for user in users {
        let Some(token) = user.token.as_deref().filter(|t| !t.is_empty()) else {
            info!("🧑 Skipping profile update for {}: no token", user.username);
            outcomes.push(ProfileOutcome::Skipped);
            continue;
        };

        let payload = profile_service::build_profile(user, config, rng);
        let outcome =
            match profile_service::update_profile(client, config, &user.username, token, &payload)
                .await
            {
                Ok(status) => ProfileOutcome::Updated { status },
                Err(e) => {
                    error!("🧑 Error updating profile for {}: {}", user.username, e);
                    ProfileOutcome::Failed(e)
                }
            };
        outcomes.push(outcome);
    }
    outcomes
}

/// Runs the whole pipeline with a fresh HTTP client.
pub async fn run(config: &SeedConfig) -> Result<SeedReport, SeedError> {
    let client = Client::builder().build()?;
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(run_with_client(&client, config, &mut rng).await)
}

pub async fn run_with_client<R: Rng + ?Sized>(
    client: &Client,
    config: &SeedConfig,
    rng: &mut R,
) -> SeedReport {
    let (mut users, source) =
        user_generator::generate_users(client, config, config.user_count, rng).await;
    info!("🌱 Seeding {} users ({:?})", users.len(), source);

    let registrations = register_users(client, config, &users).await;
    let authentications = authenticate_users(client, config, &mut users).await;
    let profiles = populate_profiles(client, config, &users, rng).await;

    let records = users
        .iter()
        .zip(registrations)
        .zip(authentications)
        .zip(profiles)
        .map(|(((user, registration), authentication), profile)| RecordReport {
            username: user.username.clone(),
            registration: Some(registration),
            authentication: Some(authentication),
            profile: Some(profile),
        })
        .collect::<Vec<_>>();

    let report = SeedReport { source, records };
    let summary = report.summary();
    info!(
        "🌱 Seeding done: generated={}, registered={}, authenticated={}, profiles_updated={}, skipped={}, failed={}",
        summary.generated,
        summary.registered,
        summary.authenticated,
        summary.profiles_updated,
        summary.profiles_skipped,
        summary.profiles_failed
    );
    report
}
