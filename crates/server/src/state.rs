use std::sync::Arc;

use sea_orm::DatabaseConnection;

/// Per-process state handed to every handler through axum `State`.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    /// Shared secret required by `/report-closed`.
    pub api_key: Arc<str>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, api_key: &str) -> Self {
        Self { db, api_key: Arc::from(api_key) }
    }
}
