//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure expected directories exist; warn on missing optional ones.
///
/// `static_dir` holds the landing page and is only checked. `data_dir` holds
/// the SQLite file and is created when missing.
pub async fn ensure_env(static_dir: &str, data_dir: Option<&Path>) -> anyhow::Result<()> {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; landing page will 404");
    }
    if let Some(dir) = data_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("cafe-env-{}", uuid::Uuid::new_v4()));
        let data = root.join("data");
        ensure_env("/definitely/not/here", Some(&data)).await?;
        assert!(tokio::fs::metadata(&data).await?.is_dir());
        tokio::fs::remove_dir_all(&root).await?;
        Ok(())
    }

    #[tokio::test]
    async fn no_data_dir_is_fine() -> anyhow::Result<()> {
        ensure_env(".", None).await
    }
}
