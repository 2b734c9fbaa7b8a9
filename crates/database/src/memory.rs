use crate::error::DbError;
use crate::store::{Mutation, Page, PageRequest, TrialStore};
use async_trait::async_trait;
use core_types::{Trial, TrialId, TrialStatus};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A process-local `TrialStore`.
///
/// Serves the `memory` backend and the test suites. Writes hold the lock for the
/// whole read-modify-write, which gives the same per-record atomicity as the
/// PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    trials: RwLock<BTreeMap<TrialId, Trial>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that already holds `trials`, stored as given.
    pub fn with_trials(trials: impl IntoIterator<Item = Trial>) -> Self {
        let trials = trials.into_iter().map(|trial| (trial.id, trial)).collect();
        Self {
            trials: RwLock::new(trials),
        }
    }
}

#[async_trait]
impl TrialStore for InMemoryStore {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Trial>, DbError> {
        let trials = self.trials.read().await;
        let mut sorted: Vec<&Trial> = trials.values().collect();
        sorted.sort_by(|a, b| request.sort().compare(a, b));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = sorted
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, trials.len() as u64))
    }

    async fn find_by_id(&self, id: TrialId) -> Result<Option<Trial>, DbError> {
        Ok(self.trials.read().await.get(&id).cloned())
    }

    async fn find_by_status(&self, status: TrialStatus) -> Result<Vec<Trial>, DbError> {
        let trials = self.trials.read().await;
        Ok(trials
            .values()
            .filter(|trial| trial.status == status)
            .cloned()
            .collect())
    }

    async fn find_all_unpaged(&self) -> Result<Vec<Trial>, DbError> {
        Ok(self.trials.read().await.values().cloned().collect())
    }

    async fn save(&self, trial: &Trial) -> Result<Trial, DbError> {
        self.trials.write().await.insert(trial.id, trial.clone());
        Ok(trial.clone())
    }

    async fn modify(&self, id: TrialId, mutation: Mutation) -> Result<Trial, DbError> {
        let mut trials = self.trials.write().await;
        let stored = trials.get_mut(&id).ok_or(DbError::NotFound(id))?;

        let mut working = stored.clone();
        mutation(&mut working)?;
        *stored = working.clone();
        Ok(working)
    }

    async fn delete(&self, trial: &Trial) -> Result<(), DbError> {
        self.trials
            .write()
            .await
            .remove(&trial.id)
            .map(|_| ())
            .ok_or(DbError::NotFound(trial.id))
    }
}
