pub use sea_orm_migration::prelude::*;

mod m20250801_000000_create_product;
mod m20250801_000001_seed_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000000_create_product::Migration),
            Box::new(m20250801_000001_seed_catalog::Migration),
        ]
    }
}
