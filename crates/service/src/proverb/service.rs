use std::sync::Arc;

use models::{Proverb, ProverbInput, ProverbQuery};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::proverb::collection;
use crate::storage::ProverbRepository;

/// The proverb store.
///
/// Every operation is one load-transform-save pass over the whole collection.
/// Mutations hold `write_gate` for the full pass so concurrent requests in
/// this process cannot overwrite each other's changes. Writers in other
/// processes are not coordinated.
pub struct ProverbService<R: ProverbRepository + ?Sized = dyn ProverbRepository> {
    repo: Arc<R>,
    write_gate: Mutex<()>,
}

impl<R: ProverbRepository + ?Sized> ProverbService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, write_gate: Mutex::new(()) }
    }

    /// Filtered view of the collection, in stored order.
    pub async fn list(&self, query: &ProverbQuery) -> Result<Vec<Proverb>, ServiceError> {
        let proverbs = self.repo.load().await?;
        Ok(collection::apply_query(proverbs, query))
    }

    pub async fn get(&self, id: u64) -> Result<Proverb, ServiceError> {
        let proverbs = self.repo.load().await?;
        collection::get_by_id(&proverbs, id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Proverb"))
    }

    /// Uniform pick over the unfiltered collection.
    pub async fn random(&self) -> Result<Proverb, ServiceError> {
        let proverbs = self.repo.load().await?;
        let mut rng = rand::thread_rng();
        collection::pick_random(&proverbs, &mut rng).cloned()
    }

    #[instrument(skip(self, input), fields(category = %input.category))]
    pub async fn create(&self, input: ProverbInput) -> Result<Proverb, ServiceError> {
        input.validate()?;

        let _guard = self.write_gate.lock().await;
        let mut proverbs = self.repo.load().await?;
        let proverb = input.into_proverb(collection::unique_id(&proverbs)?);
        proverbs.push(proverb.clone());
        self.repo.save(&proverbs).await?;

        info!(id = proverb.id, "proverb_created");
        Ok(proverb)
    }

    /// Replace every field but `id`. A missing id is reported before field
    /// validation.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: u64, input: ProverbInput) -> Result<Proverb, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut proverbs = self.repo.load().await?;
        let index = proverbs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("Proverb"))?;
        input.validate()?;

        let proverb = input.into_proverb(id);
        proverbs[index] = proverb.clone();
        self.repo.save(&proverbs).await?;

        info!(id, "proverb_updated");
        Ok(proverb)
    }

    /// Remove the record if present; returns whether one was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut proverbs = self.repo.load().await?;
        let before = proverbs.len();
        proverbs.retain(|p| p.id != id);
        let removed = proverbs.len() != before;
        self.repo.save(&proverbs).await?;

        info!(id, removed, "proverb_deleted");
        Ok(removed)
    }
}
