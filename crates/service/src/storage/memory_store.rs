use async_trait::async_trait;
use models::Proverb;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::ProverbRepository;

/// Process-local collection. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Vec<Proverb>>,
}

impl MemoryStore {
    pub fn with_proverbs(proverbs: Vec<Proverb>) -> Self {
        Self { inner: RwLock::new(proverbs) }
    }
}

#[async_trait]
impl ProverbRepository for MemoryStore {
    async fn load(&self) -> Result<Vec<Proverb>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, proverbs: &[Proverb]) -> Result<(), ServiceError> {
        let mut inner = self.inner.write().await;
        *inner = proverbs.to_vec();
        Ok(())
    }
}
