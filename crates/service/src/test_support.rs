#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate};
use configs::DatabaseConfig;

/// Fresh, migrated SQLite database in a temp file; one per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let path = std::env::temp_dir().join(format!("cafe-svc-{}.db", uuid::Uuid::new_v4()));
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 2,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
