//! Environment/runtime helpers
//!
//! Sanity checks to ensure the directories the service writes into exist at startup.

use std::path::Path;

use tracing::info;

/// Create every directory in `dirs` (and parents) if missing.
pub async fn ensure_dirs<P: AsRef<Path>>(dirs: &[P]) -> anyhow::Result<()> {
    for dir in dirs {
        let dir = dir.as_ref();
        if tokio::fs::metadata(dir).await.is_err() {
            info!(dir = %dir.display(), "creating missing directory");
        }
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
    async fn ensure_dirs_creates_nested_paths() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("ensure_dirs_{}", uuid::Uuid::new_v4()));
        let blobs = root.join("public").join("pets");
        let data = root.join("data");
        ensure_dirs(&[&blobs, &data]).await?;
        assert!(tokio::fs::metadata(&blobs).await?.is_dir());
        assert!(tokio::fs::metadata(&data).await?.is_dir());

        // second call is a no-op
        ensure_dirs(&[&blobs]).await?;
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
