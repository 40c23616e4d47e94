use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductPage};

/// Storage port for products.
///
/// Adapters must be behaviorally equivalent for identical filters over the
/// same data: [`crate::orm::OrmProductRepository`] pushes filtering, sorting
/// and pagination into the database, [`crate::sql::SqlProductRepository`]
/// runs a raw parameterized statement and pages in memory, and
/// [`crate::memory::InMemoryProductRepository`] runs entirely on the query
/// evaluator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Filtered, sorted, paginated listing plus the count of all rows
    /// matching the filter regardless of pagination.
    async fn list(&self, filter: ProductFilter) -> CatalogResult<ProductPage>;

    /// Fetch a product by id
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Persist a newly created product
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    /// Full-field update. Ok(false) when the row no longer exists.
    async fn update(&self, product: Product) -> CatalogResult<bool>;

    /// Delete by id. Ok(false) when the row did not exist.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Update only the active flag. Ok(false) when the row does not exist.
    async fn set_status(&self, id: Uuid, is_active: bool) -> CatalogResult<bool>;
}
