use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use crate::models::Product;

/// SeaORM entity for the `product` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product::from_parts(
            model.id,
            model.name,
            model.description,
            model.price,
            model.is_active,
        )
    }
}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            id: Set(product.id()),
            name: Set(product.name().to_string()),
            description: Set(product.description().map(|s| s.to_string())),
            price: Set(product.price()),
            is_active: Set(product.is_active()),
        }
    }
}
