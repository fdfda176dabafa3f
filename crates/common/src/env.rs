//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the directory that will hold local state (the SQLite file) exists.
pub async fn ensure_env(data_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let data_dir = data_dir.as_ref();
    if data_dir.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(data_dir).await.is_err() {
        info!(data_dir = %data_dir.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_dir() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let nested = tmp.path().join("a").join("b");
        ensure_env(&nested).await?;
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_env(&nested).await?;
        Ok(())
    }

    #[tokio::test]
    async fn empty_path_is_current_dir() -> anyhow::Result<()> {
        ensure_env("").await
    }
}
