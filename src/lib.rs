pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::SeedConfig;
pub use error::SeedError;
