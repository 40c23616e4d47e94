//! Raw-SQL adapter: the parameterized-statement backend.
//!
//! Builds one statement per operation with conditionally appended WHERE
//! clauses. User values are always bound parameters, never concatenated, and
//! the ORDER BY column comes from a fixed safe set, so the sort key cannot
//! inject SQL.
//!
//! The listing fetches every matching row and pages in memory. That is
//! acceptable for a small catalog and nothing more; at scale the pagination
//! belongs in the statement.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductPage, SortField};
use crate::query;
use crate::repository::ProductRepository;

pub struct SqlProductRepository {
    db: DatabaseConnection,
}

impl SqlProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing product rows
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: rust_decimal::Decimal,
    is_active: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::from_parts(row.id, row.name, row.description, row.price, row.is_active)
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, is_active FROM product";

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list(&self, filter: ProductFilter) -> CatalogResult<ProductPage> {
        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut values: Vec<Value> = Vec::new();

        if let Some(active) = filter.is_active {
            values.push(active.into());
            sql.push_str(&format!(" AND is_active = ${}", values.len()));
        }

        if let Some(fragment) = filter.name_fragment() {
            values.push(format!("%{}%", fragment).into());
            sql.push_str(&format!(" AND name ILIKE ${}", values.len()));
        }

        if let Some(min) = filter.min_price {
            values.push(min.into());
            sql.push_str(&format!(" AND price >= ${}", values.len()));
        }

        if let Some(max) = filter.max_price {
            values.push(max.into());
            sql.push_str(&format!(" AND price <= ${}", values.len()));
        }

        // Sort column restricted to a fixed set; id breaks ties so pages
        // stay deterministic.
        let column = match filter.sort_field() {
            SortField::Name => "name",
            SortField::Price => "price",
        };
        let direction = if filter.ascending { "ASC" } else { "DESC" };
        sql.push_str(&format!(" ORDER BY {} {}, id ASC", column, direction));

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, &sql, values);

        let rows = ProductRow::find_by_statement(stmt).all(&self.db).await?;

        let total_count = rows.len() as u64;
        let products: Vec<Product> = rows.into_iter().map(Into::into).collect();

        Ok(ProductPage {
            products: query::paginate(products, &filter),
            total_count,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, &sql, [id.into()]);

        let row = ProductRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let sql = r#"
            INSERT INTO product (id, name, description, price, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, is_active
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id().into(),
                product.name().to_string().into(),
                product.description().map(|s| s.to_string()).into(),
                product.price().into(),
                product.is_active().into(),
            ],
        );

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                crate::error::CatalogError::Database("Insert returned no row".to_string())
            })?;

        tracing::info!(product_id = %product.id(), "Inserted product");
        Ok(row.into())
    }

    async fn update(&self, product: Product) -> CatalogResult<bool> {
        let sql = r#"
            UPDATE product
            SET name = $2, description = $3, price = $4, is_active = $5
            WHERE id = $1
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                product.id().into(),
                product.name().to_string().into(),
                product.description().map(|s| s.to_string()).into(),
                product.price().into(),
                product.is_active().into(),
            ],
        );

        let result = self.db.execute_raw(stmt).await?;

        tracing::info!(
            product_id = %product.id(),
            rows_affected = result.rows_affected(),
            "Updated product"
        );
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let sql = "DELETE FROM product WHERE id = $1";
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self.db.execute_raw(stmt).await?;

        tracing::info!(
            product_id = %id,
            rows_affected = result.rows_affected(),
            "Deleted product"
        );
        Ok(result.rows_affected() > 0)
    }

    async fn set_status(&self, id: Uuid, is_active: bool) -> CatalogResult<bool> {
        let sql = "UPDATE product SET is_active = $2 WHERE id = $1";
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [id.into(), is_active.into()],
        );

        let result = self.db.execute_raw(stmt).await?;

        tracing::info!(
            product_id = %id,
            is_active,
            rows_affected = result.rows_affected(),
            "Updated product status"
        );
        Ok(result.rows_affected() > 0)
    }
}
