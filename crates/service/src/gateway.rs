use chrono::NaiveDate;
use core_types::{Clock, Trial, TrialId, TrialStatus};
use database::{DbError, Mutation, Page, PageRequest, TrialStore};
use lifecycle::derive_status;
use std::sync::Arc;

/// Wraps a `TrialStore` so that every trial coming out of it, and every trial
/// going into it, has its status derived against the injected clock.
#[derive(Clone)]
pub struct TrialGateway {
    store: Arc<dyn TrialStore>,
    clock: Arc<dyn Clock>,
}

impl TrialGateway {
    pub fn new(store: Arc<dyn TrialStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn refresh(&self, mut trials: Vec<Trial>) -> Vec<Trial> {
        let today = self.today();
        for trial in &mut trials {
            derive_status(trial, today);
        }
        trials
    }

    pub async fn load_page(&self, request: PageRequest) -> Result<Page<Trial>, DbError> {
        let mut page = self.store.find_all(request).await?;
        page.content = self.refresh(page.content);
        Ok(page)
    }

    pub async fn load(&self, id: TrialId) -> Result<Option<Trial>, DbError> {
        let today = self.today();
        Ok(self.store.find_by_id(id).await?.map(|mut trial| {
            derive_status(&mut trial, today);
            trial
        }))
    }

    /// Trials stored with `status`; the returned statuses are re-derived and may differ.
    pub async fn load_by_status(&self, status: TrialStatus) -> Result<Vec<Trial>, DbError> {
        Ok(self.refresh(self.store.find_by_status(status).await?))
    }

    pub async fn load_all(&self) -> Result<Vec<Trial>, DbError> {
        Ok(self.refresh(self.store.find_all_unpaged().await?))
    }

    pub async fn save(&self, mut trial: Trial) -> Result<Trial, DbError> {
        derive_status(&mut trial, self.today());
        self.store.save(&trial).await
    }

    /// Atomic read-modify-write; derives before and after `mutation`.
    pub async fn modify(&self, id: TrialId, mutation: Mutation) -> Result<Trial, DbError> {
        let today = self.today();
        let wrapped: Mutation = Box::new(move |trial: &mut Trial| {
            derive_status(trial, today);
            mutation(trial)?;
            derive_status(trial, today);
            Ok(())
        });
        self.store.modify(id, wrapped).await
    }

    pub async fn delete(&self, trial: &Trial) -> Result<(), DbError> {
        self.store.delete(trial).await
    }
}
