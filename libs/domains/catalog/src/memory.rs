//! In-memory adapter.
//!
//! A `RwLock`ed vector driven entirely by the query evaluator. Selectable
//! via configuration for dev/test runs without PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductPage};
use crate::query;
use crate::repository::ProductRepository;

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, e.g. with the sample catalog.
    pub async fn seed(&self, products: Vec<Product>) {
        let mut store = self.store.write().await;
        store.extend(products);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, filter: ProductFilter) -> CatalogResult<ProductPage> {
        let store = self.store.read().await;
        Ok(query::evaluate(&store, &filter))
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id() == id).cloned())
    }

    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let mut store = self.store.write().await;
        store.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|p| p.id() == product.id()) {
            Some(slot) => {
                *slot = product;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|p| p.id() != id);
        Ok(store.len() < before)
    }

    async fn set_status(&self, id: Uuid, is_active: bool) -> CatalogResult<bool> {
        let mut store = self.store.write().await;
        match store.iter_mut().find(|p| p.id() == id) {
            Some(product) => {
                product.set_status(is_active);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use rust_decimal::Decimal;

    fn product(name: &str, price: i64) -> Product {
        Product::create(CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_active: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_get_round_trip() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("Coffee", 200)).await.unwrap();

        let fetched = repo.get_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_false() {
        let repo = InMemoryProductRepository::new();
        assert!(!repo.update(product("Ghost", 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("Coffee", 200)).await.unwrap();

        assert!(repo.delete(created.id()).await.unwrap());
        assert!(!repo.delete(created.id()).await.unwrap());
        assert!(repo.get_by_id(created.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_status_flips_only_the_flag() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(product("Coffee", 200)).await.unwrap();

        assert!(repo.set_status(created.id(), true).await.unwrap());

        let fetched = repo.get_by_id(created.id()).await.unwrap().unwrap();
        assert!(fetched.is_active());
        assert_eq!(fetched.name(), "Coffee");
        assert_eq!(fetched.price(), Decimal::from(200));
    }

    #[tokio::test]
    async fn test_list_filters_and_counts() {
        let repo = InMemoryProductRepository::new();
        repo.seed(vec![
            product("Coffee", 200),
            product("Tea", 100),
            product("Cocoa", 200),
        ])
        .await;

        let mut filter = ProductFilter::default();
        filter.min_price = Some(Decimal::from(150));

        let page = repo.list(filter).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.products.len(), 2);
    }
}
