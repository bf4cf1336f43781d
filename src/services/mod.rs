pub mod auth_service;
pub mod fallback_service;
pub mod identity_service;
pub mod location_service;
pub mod profile_service;
pub mod seed_service;
pub mod user_generator;
