use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sample catalog; idempotent via fixed ids
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO product (id, name, description, price, is_active)
            VALUES
                ('01985f60-0000-7000-8000-000000000001', 'Coffee', NULL, 200.00, false),
                ('01985f60-0000-7000-8000-000000000002', 'Tea', NULL, 100.00, false),
                ('01985f60-0000-7000-8000-000000000003', 'Cocoa', NULL, 200.00, false),
                ('01985f60-0000-7000-8000-000000000004', 'Chocolate', NULL, 300.00, false),
                ('01985f60-0000-7000-8000-000000000005', 'Arabica', NULL, 250.00, false)
            ON CONFLICT (id) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            DELETE FROM product
            WHERE id IN (
                '01985f60-0000-7000-8000-000000000001',
                '01985f60-0000-7000-8000-000000000002',
                '01985f60-0000-7000-8000-000000000003',
                '01985f60-0000-7000-8000-000000000004',
                '01985f60-0000-7000-8000-000000000005'
            )
            "#,
            )
            .await?;

        Ok(())
    }
}
