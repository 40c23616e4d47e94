//! Catalog Domain
//!
//! Product catalog management: validated product records with
//! filtered/sorted/paginated listing queries over interchangeable storage
//! backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Storage port (SeaORM / raw SQL / in-memory adapters)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, filter + query evaluator
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, CatalogService, OrmProductRepository};
//!
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! let repository = OrmProductRepository::new(db);
//! let service = CatalogService::new(repository);
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod orm;
pub mod query;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductListResponse, ProductPage,
    ProductSummary, SortField, StatusUpdate, UpdateProduct,
};
pub use orm::OrmProductRepository;
pub use repository::ProductRepository;
pub use service::CatalogService;
pub use sql::SqlProductRepository;
