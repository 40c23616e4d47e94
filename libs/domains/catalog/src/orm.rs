//! SeaORM adapter: the structured-query backend.
//!
//! Filtering, sorting and pagination all run inside PostgreSQL; the total
//! match count comes from a separate aggregate query issued before the page
//! query.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveModelTrait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use crate::entity;
use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductPage, SortField};
use crate::repository::ProductRepository;

pub struct OrmProductRepository {
    db: DatabaseConnection,
}

impl OrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &ProductFilter) -> Select<entity::Entity> {
        let mut query = entity::Entity::find();

        if let Some(active) = filter.is_active {
            query = query.filter(entity::Column::IsActive.eq(active));
        }

        if let Some(fragment) = filter.name_fragment() {
            query = query.filter(Expr::col(entity::Column::Name).ilike(format!("%{}%", fragment)));
        }

        if let Some(min) = filter.min_price {
            query = query.filter(entity::Column::Price.gte(min));
        }

        if let Some(max) = filter.max_price {
            query = query.filter(entity::Column::Price.lte(max));
        }

        query
    }
}

#[async_trait]
impl ProductRepository for OrmProductRepository {
    async fn list(&self, filter: ProductFilter) -> CatalogResult<ProductPage> {
        let query = Self::filtered(&filter);

        // Count before sorting and pagination so the total reflects every
        // filter predicate and nothing else.
        let total_count = query.clone().count(&self.db).await?;

        let sort_column = match filter.sort_field() {
            SortField::Name => entity::Column::Name,
            SortField::Price => entity::Column::Price,
        };

        // Secondary order on id keeps pages deterministic for equal keys.
        let query = if filter.ascending {
            query.order_by_asc(sort_column)
        } else {
            query.order_by_desc(sort_column)
        }
        .order_by_asc(entity::Column::Id)
        .offset(filter.offset())
        .limit(filter.effective_page_size());

        let models = query.all(&self.db).await?;

        Ok(ProductPage {
            products: models.into_iter().map(Into::into).collect(),
            total_count,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let active_model: entity::ActiveModel = (&product).into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Inserted product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> CatalogResult<bool> {
        let active_model: entity::ActiveModel = (&product).into();

        match entity::Entity::update(active_model).exec(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = %model.id, "Updated product");
                Ok(true)
            }
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn set_status(&self, id: Uuid, is_active: bool) -> CatalogResult<bool> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::IsActive, Expr::value(is_active))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, is_active, "Updated product status");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
