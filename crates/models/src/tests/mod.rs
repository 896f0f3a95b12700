
/// Entity-level CRUD against the `product` table
pub mod crud_tests;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate, or `None` when no database is configured for tests.
pub(crate) async fn test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("skip: DATABASE_URL not set or SKIP_DB_TESTS present");
        return None;
    }
    let db = match crate::db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}
