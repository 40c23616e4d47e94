//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the catalog HTTP surface.
//!
//! ## Modules
//!
//! - **[`auth`]**: admin session cookies (signed, expiring) and auth middleware
//! - **[`server`]**: router/server bootstrap, OpenAPI docs, graceful shutdown
//! - **[`errors`]**: structured error responses
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`health`]**: health endpoint payloads

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

// Re-export auth types
pub use auth::{admin_auth_middleware, SessionAuth, SessionClaims, SESSION_COOKIE};

// Re-export server types
pub use server::{create_app, create_router, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export health types
pub use health::HealthResponse;
