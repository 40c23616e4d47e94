//! PostgreSQL connectivity for the catalog services.
//!
//! Provides connection management with pooled SeaORM connections, retrying
//! connectors for startup resilience, migration running, and a health ping.

pub mod common;
pub mod postgres;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
