//! Catalog API - product catalog management over REST

use axum_helpers::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres;
use domain_catalog::{
    CatalogService, InMemoryProductRepository, OrmProductRepository, ProductRepository,
    SqlProductRepository,
};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::{Backend, Config};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(backend = ?config.backend, "Starting catalog API");

    match config.backend {
        Backend::Memory => {
            info!("Using in-memory repository; data will not survive restarts");
            let service = CatalogService::new(InMemoryProductRepository::new());
            serve(config, service).await
        }
        Backend::Orm | Backend::Sql => {
            let Some(pg) = config.postgres.clone() else {
                eyre::bail!("DATABASE_URL is required for the orm/sql backends");
            };

            info!("Connecting to PostgreSQL");
            let retry = RetryConfig::new()
                .with_max_retries(5)
                .with_initial_delay(500)
                .with_max_delay(5000);
            let db = postgres::connect_from_config_with_retry(&pg, Some(retry)).await?;

            postgres::run_migrations::<Migrator>(&db).await?;

            if config.backend == Backend::Sql {
                serve(config, CatalogService::new(SqlProductRepository::new(db))).await
            } else {
                serve(config, CatalogService::new(OrmProductRepository::new(db))).await
            }
        }
    }
}

async fn serve<R: ProductRepository + 'static>(
    config: Config,
    service: CatalogService<R>,
) -> eyre::Result<()> {
    let api_routes = api::routes(&config, service);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    info!("Catalog API listening on {}", config.server.address());
    create_app(router, &config.server).await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
