//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `data_file` exists; note when the file itself
/// is absent so the first load will create it.
pub async fn ensure_env(data_file: &str) -> anyhow::Result<()> {
    let path = Path::new(data_file);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{data_file} is a directory, expected a JSON file"));
        }
        Ok(_) => info!(%data_file, "using existing proverb collection"),
        Err(_) => warn!(%data_file, "proverb collection not found; an empty one will be created"),
    }
    Ok(())
}
