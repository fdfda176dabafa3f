//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the directory holding the SQLite file exists.
pub async fn ensure_env(data_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await
}
