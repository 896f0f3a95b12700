#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_with_config;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<configs::DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(configs::DatabaseConfig {
        url,
        min_connections: 1,
        max_connections: 20,
        acquire_timeout_secs: 10,
        ..Default::default()
    })
}

/// A migrated connection, or `None` when no test database is configured.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_config() else {
        eprintln!("skip: DATABASE_URL not set or SKIP_DB_TESTS present");
        return Ok(None);
    };

    // Run migrations exactly once, with a throwaway connection
    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => migration::Migrator::up(&db, None).await.is_ok(),
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    false
                }
            }
        })
        .await;
    if !migrated {
        return Ok(None);
    }

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
