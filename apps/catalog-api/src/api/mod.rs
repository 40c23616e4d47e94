//! API routes module

pub mod auth;

use axum::Router;
use axum_helpers::SessionAuth;
use domain_catalog::{handlers, CatalogService, ProductRepository};

use crate::config::Config;

/// Assemble all API routes for a concrete repository adapter.
pub fn routes<R: ProductRepository + 'static>(
    config: &Config,
    service: CatalogService<R>,
) -> Router {
    let session = SessionAuth::new(&config.session_secret, config.session_ttl_minutes);

    let auth_state = auth::AuthState {
        credentials: config.admin.clone(),
        session: session.clone(),
    };

    let products = handlers::router(service.clone()).merge(handlers::admin_router(service, session));

    Router::new()
        .nest("/products", products)
        .nest("/auth", auth::router(auth_state))
}
