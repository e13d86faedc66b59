//! # Luxe Rental
//!
//! Storefront backend for a luxury car rental service: public catalog,
//! per-user cart, atomic checkout and an admin fleet dashboard.
//!
//! ## Architecture
//!
//! - **domain**: entities, pricing rules and repository traits
//! - **application**: services, including the checkout orchestrator
//! - **infrastructure**: SeaORM persistence, in-memory store, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, validation helpers, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
