use dotenvy::dotenv;
use tracing::info;

use user_seeder::services::seed_service;
use user_seeder::SeedConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = SeedConfig::from_env();
    info!(
        "🌱 Seeding {} users into {}",
        config.user_count, config.api_base_url
    );

    match seed_service::run(&config).await {
        Ok(report) => {
            let summary = report.summary();
            println!(
                "seed ({:?}): generated={}, registered={}, authenticated={}, profiles_updated={}, skipped={}, failed={}",
                report.source,
                summary.generated,
                summary.registered,
                summary.authenticated,
                summary.profiles_updated,
                summary.profiles_skipped,
                summary.profiles_failed
            );
        }
        Err(e) => {
            eprintln!("seed failed to start: {}", e);
            std::process::exit(1);
        }
    }
}
