use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use models::Proverb;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::ProverbRepository;

/// JSON file-backed proverb collection.
///
/// The collection is a single pretty-printed JSON array. Writes go to a
/// sibling temp file which is then renamed over the target, so a failed write
/// leaves the previous collection intact.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "proverbs.json".into());
        name.push(format!(".{}.tmp", Uuid::new_v4()));
        self.file_path.with_file_name(name)
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> ServiceError {
        ServiceError::Io(format!("{action} {}: {e}", self.file_path.display()))
    }

    async fn write_replace(&self, data: &[u8]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error("create parent of", e))?;
        }

        let tmp = self.temp_path();
        let written = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&tmp, &self.file_path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(self.io_error("write", e));
        }
        Ok(())
    }

    /// Publish `data` at the target path only if nothing is there yet.
    ///
    /// The temp file is hard-linked into place, which fails when the target
    /// exists, so a concurrent `save` is never overwritten. Returns whether
    /// this call created the file.
    async fn write_if_absent(&self, data: &[u8]) -> Result<bool, ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error("create parent of", e))?;
        }

        let tmp = self.temp_path();
        let linked = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            drop(file);
            fs::hard_link(&tmp, &self.file_path).await
        }
        .await;
        let _ = fs::remove_file(&tmp).await;

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(self.io_error("initialize", e)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Proverb>, ServiceError> {
        serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Format(format!("{}: {e}", self.file_path.display())))
    }
}

#[async_trait]
impl ProverbRepository for JsonFileStore {
    async fn load(&self) -> Result<Vec<Proverb>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => {
                let proverbs = self.decode(&bytes)?;
                debug!(path = %self.file_path.display(), count = proverbs.len(), "collection loaded");
                Ok(proverbs)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.write_if_absent(b"[]").await? {
                    info!(path = %self.file_path.display(), "initialized empty proverb collection");
                    return Ok(Vec::new());
                }
                // another task created it first
                let bytes = fs::read(&self.file_path).await.map_err(|e| self.io_error("read", e))?;
                self.decode(&bytes)
            }
            Err(e) => Err(self.io_error("read", e)),
        }
    }

    async fn save(&self, proverbs: &[Proverb]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(proverbs).map_err(|e| ServiceError::Format(e.to_string()))?;
        self.write_replace(&data).await?;
        debug!(path = %self.file_path.display(), count = proverbs.len(), "collection saved");
        Ok(())
    }
}
