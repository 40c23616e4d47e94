//! Catalog service - business logic layer

use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductListResponse, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Catalog service providing the product operations.
///
/// Translates external payloads into entity operations, applies validation
/// before persistence, and maps persisted entities to transfer shapes.
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching the filter.
    ///
    /// A failing read degrades to an empty page instead of failing the
    /// request; the error is logged and the caller sees an empty catalog.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductListResponse {
        match self.repository.list(filter).await {
            Ok(page) => ProductListResponse {
                products: page.products.iter().map(Into::into).collect(),
                total_count: page.total_count,
            },
            Err(e) => {
                warn!("Listing products failed, returning empty page: {}", e);
                ProductListResponse {
                    products: Vec::new(),
                    total_count: 0,
                }
            }
        }
    }

    /// Fetch one product by id.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductDetail> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        Ok(ProductDetail::from(&product))
    }

    /// Validate and persist a new product.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<ProductDetail> {
        let product = Product::create(input)?;
        let persisted = self.repository.insert(product).await?;

        tracing::info!(product_id = %persisted.id(), "Product created");
        Ok(ProductDetail::from(&persisted))
    }

    /// Replace all fields of an existing product.
    ///
    /// Re-fetches the current entity first; an absent id reports not-found
    /// rather than blindly overwriting.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> CatalogResult<ProductDetail> {
        let mut product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        product.apply_update(input)?;

        // The row can vanish between fetch and write; surface that as
        // not-found rather than success.
        if !self.repository.update(product.clone()).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product updated");
        Ok(ProductDetail::from(&product))
    }

    /// Delete a product by id.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Toggle the active flag of a product, fetch-then-mutate.
    #[instrument(skip(self))]
    pub async fn set_product_status(&self, id: Uuid, is_active: bool) -> CatalogResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(CatalogError::NotFound(id));
        }

        if !self.repository.set_status(id, is_active).await? {
            return Err(CatalogError::NotFound(id));
        }

        tracing::info!(product_id = %id, is_active, "Product status updated");
        Ok(())
    }
}

impl<R: ProductRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use rust_decimal::Decimal;

    fn create_input(name: &str, price: i64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_active: false,
        }
    }

    fn update_input(name: &str, price: i64) -> UpdateProduct {
        UpdateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().returning(|product| Ok(product));

        let service = CatalogService::new(repo);
        let detail = service
            .create_product(create_input("Coffee", 200))
            .await
            .unwrap();

        assert_eq!(detail.name, "Coffee");
        assert_eq!(detail.price, Decimal::from(200));
        assert!(!detail.is_active);
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_before_persistence() {
        // No insert expectation: reaching the repository would panic.
        let repo = MockProductRepository::new();
        let service = CatalogService::new(repo);

        let err = service
            .create_product(create_input("", 200))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(repo);
        let err = service.get_product(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_refetches_and_replaces_fields() {
        let existing = Product::create(create_input("Coffee", 200)).unwrap();
        let id = existing.id();

        let mut repo = MockProductRepository::new();
        let fetched = existing.clone();
        repo.expect_get_by_id()
            .return_once(move |_| Ok(Some(fetched)));
        repo.expect_update().returning(|_| Ok(true));

        let service = CatalogService::new(repo);
        let detail = service
            .update_product(id, update_input("Tea", 100))
            .await
            .unwrap();

        assert_eq!(detail.id, id);
        assert_eq!(detail.name, "Tea");
        assert_eq!(detail.price, Decimal::from(100));
        assert!(detail.is_active);
    }

    #[tokio::test]
    async fn test_update_product_absent_id_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(repo);
        let err = service
            .update_product(Uuid::now_v7(), update_input("Tea", 100))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_invalid_payload_never_writes() {
        let existing = Product::create(create_input("Coffee", 200)).unwrap();
        let id = existing.id();

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .return_once(move |_| Ok(Some(existing)));
        // No update expectation: a write would panic.

        let service = CatalogService::new(repo);
        let err = service
            .update_product(id, update_input("", -1))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_product_missing_row_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = CatalogService::new(repo);
        let err = service.delete_product(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_status_fetches_then_mutates() {
        let existing = Product::create(create_input("Coffee", 200)).unwrap();
        let id = existing.id();

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_set_status()
            .withf(move |got_id, active| *got_id == id && *active)
            .returning(|_, _| Ok(true));

        let service = CatalogService::new(repo);
        assert!(service.set_product_status(id, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_set_status_absent_id_skips_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        // No set_status expectation: a write would panic.

        let service = CatalogService::new(repo);
        let err = service
            .set_product_status(Uuid::now_v7(), true)
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_products_degrades_to_empty_page_on_read_failure() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|_| Err(CatalogError::Database("connection reset".to_string())));

        let service = CatalogService::new(repo);
        let response = service.list_products(ProductFilter::default()).await;

        assert!(response.products.is_empty());
        assert_eq!(response.total_count, 0);
    }

    #[tokio::test]
    async fn test_list_products_maps_to_summaries() {
        let product = Product::create(CreateProduct {
            name: "Coffee".to_string(),
            description: Some("hidden in summaries".to_string()),
            price: Decimal::from(200),
            is_active: true,
        })
        .unwrap();

        let mut repo = MockProductRepository::new();
        repo.expect_list().return_once(move |_| {
            Ok(crate::models::ProductPage {
                products: vec![product],
                total_count: 1,
            })
        });

        let service = CatalogService::new(repo);
        let response = service.list_products(ProductFilter::default()).await;

        assert_eq!(response.total_count, 1);
        assert_eq!(response.products[0].name, "Coffee");
        assert!(response.products[0].is_active);
    }
}
