use sea_orm::{DatabaseConnection, DbErr};

/// Ping the database to verify the connection is alive.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
