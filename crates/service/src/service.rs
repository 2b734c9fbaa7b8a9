use crate::error::ServiceError;
use crate::gateway::TrialGateway;
use analytics::{StatisticsEngine, TrialStatistics};
use configuration::{PaginationSettings, TrialSettings};
use core_types::{NewTrial, Trial, TrialId, TrialStatus, TrialUpdate};
use database::{Page, PageRequest, SortKey};
use lifecycle::{apply_explicit_status, apply_field_update};
use serde::Deserialize;

/// Query parameters of the paged listing. Absent values fall back to the
/// configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// The use cases exposed by the API, one method each.
#[derive(Clone)]
pub struct TrialService {
    gateway: TrialGateway,
    trials: TrialSettings,
    pagination: PaginationSettings,
}

impl TrialService {
    pub fn new(
        gateway: TrialGateway,
        trials: TrialSettings,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            gateway,
            trials,
            pagination,
        }
    }

    /// Lists one page of trials. Page sizes above the configured maximum are clamped.
    pub async fn list(&self, params: ListParams) -> Result<Page<Trial>, ServiceError> {
        let sort = match params.sort.as_deref() {
            Some(key) => key.parse::<SortKey>()?,
            None => SortKey::default(),
        };
        let size = params
            .size
            .unwrap_or(self.pagination.default_size)
            .min(self.pagination.max_size);
        let request = PageRequest::new(params.page.unwrap_or(0), size, sort)?;

        tracing::debug!(?request, "Listing trials.");
        Ok(self.gateway.load_page(request).await?)
    }

    /// Lists the trials stored under `status` (case-insensitive).
    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Trial>, ServiceError> {
        let parsed: TrialStatus = status.parse()?;
        let trials = self.gateway.load_by_status(parsed).await?;
        if trials.is_empty() {
            return Err(ServiceError::NoData(format!(
                "No trials found with status: {status}"
            )));
        }
        Ok(trials)
    }

    /// Acquisition statistics for the trials ending in the current month.
    pub async fn statistics(&self) -> Result<TrialStatistics, ServiceError> {
        let trials = self.gateway.load_all().await?;
        let stats = StatisticsEngine::new().calculate(&trials, self.gateway.today())?;
        Ok(stats)
    }

    pub async fn create(&self, request: NewTrial) -> Result<Trial, ServiceError> {
        let trial = Trial::from_request(
            request,
            self.gateway.today(),
            self.trials.trial_length_days,
        )?;
        let saved = self.gateway.save(trial).await?;
        tracing::info!(trial_id = saved.id, end_date = %saved.end_date, "Trial created.");
        Ok(saved)
    }

    /// Updates name and/or end date. Terminal trials are rejected.
    pub async fn update(&self, update: TrialUpdate) -> Result<Trial, ServiceError> {
        let id = update.id;
        let today = self.gateway.today();
        let updated = self
            .gateway
            .modify(
                id,
                Box::new(move |trial: &mut Trial| apply_field_update(trial, &update, today)),
            )
            .await?;
        tracing::info!(trial_id = id, status = %updated.status, "Trial updated.");
        Ok(updated)
    }

    /// Moves a trial to `ACQUIRED` or `WITHDRAWN`.
    pub async fn set_status(&self, id: TrialId, status: &str) -> Result<Trial, ServiceError> {
        let requested: TrialStatus = status.parse()?;
        let updated = self
            .gateway
            .modify(
                id,
                Box::new(move |trial: &mut Trial| apply_explicit_status(trial, requested)),
            )
            .await?;
        tracing::info!(trial_id = id, status = %updated.status, "Trial status set.");
        Ok(updated)
    }

    pub async fn delete(&self, id: TrialId) -> Result<(), ServiceError> {
        let trial = self
            .gateway
            .load(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Trial not found: {id}")))?;
        self.gateway.delete(&trial).await?;
        tracing::info!(trial_id = id, "Trial deleted.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::FixedClock;
    use database::{InMemoryStore, TrialStore};
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_with(store: Arc<InMemoryStore>) -> TrialService {
        let gateway = TrialGateway::new(store, Arc::new(FixedClock(today())));
        TrialService::new(gateway, TrialSettings::default(), PaginationSettings::default())
    }

    fn new_trial(id: i64, name: &str) -> NewTrial {
        NewTrial {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }

    fn stored(id: i64, status: TrialStatus, end_date: NaiveDate) -> Trial {
        Trial {
            id,
            name: format!("trial-{id}"),
            status,
            end_date,
        }
    }

    #[tokio::test]
    async fn create_fills_defaults() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store.clone());

        let trial = service.create(new_trial(1, "x")).await.unwrap();

        assert_eq!(trial.status, TrialStatus::InTrial);
        assert_eq!(trial.end_date, day(2026, 10, 23));
        assert_eq!(store.find_by_id(1).await.unwrap(), Some(trial));
    }

    #[tokio::test]
    async fn create_without_id_or_name_fails() {
        let service = service_with(Arc::new(InMemoryStore::new()));

        let no_id = NewTrial { id: None, name: Some("x".into()) };
        assert!(matches!(service.create(no_id).await, Err(ServiceError::MissingField(_))));

        let no_name = NewTrial { id: Some(1), name: None };
        assert!(matches!(service.create(no_name).await, Err(ServiceError::MissingField(_))));

        let negative = new_trial(-3, "x");
        assert!(matches!(service.create(negative).await, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn list_derives_statuses_and_pages() {
        let store = Arc::new(InMemoryStore::with_trials([
            stored(1, TrialStatus::InTrial, day(2026, 10, 1)),
            stored(2, TrialStatus::InTrial, today()),
            stored(3, TrialStatus::TrialExpired, day(2026, 11, 1)),
            stored(4, TrialStatus::Acquired, day(2026, 10, 1)),
        ]));
        let service = service_with(store);

        let page = service.list(ListParams::default()).await.unwrap();
        let statuses: Vec<_> = page.content.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            [
                TrialStatus::TrialExpired,
                TrialStatus::TrialFinalized,
                TrialStatus::InTrial,
                TrialStatus::Acquired,
            ]
        );
        assert_eq!(page.size, 10);
        assert_eq!(page.total_pages, 1);

        let second = service
            .list(ListParams { page: Some(1), size: Some(3), sort: Some("id".into()) })
            .await
            .unwrap();
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].id, 4);
    }

    #[tokio::test]
    async fn list_rejects_bad_sort_and_size_and_clamps_large_sizes() {
        let service = service_with(Arc::new(InMemoryStore::new()));

        let bad_sort = ListParams { sort: Some("price".into()), ..Default::default() };
        assert!(matches!(service.list(bad_sort).await, Err(ServiceError::InvalidRequest(_))));

        let zero = ListParams { size: Some(0), ..Default::default() };
        assert!(matches!(service.list(zero).await, Err(ServiceError::InvalidRequest(_))));

        let huge = ListParams { size: Some(10_000), ..Default::default() };
        assert_eq!(service.list(huge).await.unwrap().size, 100);
    }

    #[tokio::test]
    async fn list_by_status_validates_and_requires_matches() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store);
        service.create(new_trial(1, "teste")).await.unwrap();
        service.create(new_trial(2, "teste1")).await.unwrap();
        service.create(new_trial(3, "teste2")).await.unwrap();
        service.set_status(1, "ACQUIRED").await.unwrap();

        let in_trial = service.list_by_status("in_trial").await.unwrap();
        assert_eq!(in_trial.len(), 2);
        assert_eq!(in_trial[1].name, "teste2");

        assert!(matches!(
            service.list_by_status("SOLD").await,
            Err(ServiceError::InvalidStatus(_))
        ));
        let err = service.list_by_status("WITHDRAWN").await.unwrap_err();
        assert!(matches!(err, ServiceError::NoData(_)));
        assert_eq!(err.to_string(), "No trials found with status: WITHDRAWN");
    }

    #[tokio::test]
    async fn update_changes_fields_and_rederives() {
        let service = service_with(Arc::new(InMemoryStore::new()));
        service.create(new_trial(1, "teste")).await.unwrap();

        let renamed = service
            .update(TrialUpdate { id: 1, name: Some("updated".into()), end_date: None })
            .await
            .unwrap();
        assert_eq!(renamed.name, "updated");
        assert_eq!(renamed.status, TrialStatus::InTrial);

        let expired = service
            .update(TrialUpdate { id: 1, name: None, end_date: Some(day(2026, 10, 18)) })
            .await
            .unwrap();
        assert_eq!(expired.name, "updated");
        assert_eq!(expired.status, TrialStatus::TrialExpired);
    }

    #[tokio::test]
    async fn update_of_terminal_or_unknown_trial_fails() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store.clone());
        service.create(new_trial(1, "teste")).await.unwrap();
        service.set_status(1, "withdrawn").await.unwrap();
        let before = store.find_by_id(1).await.unwrap();

        let err = service
            .update(TrialUpdate { id: 1, name: Some("nope".into()), end_date: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ModificationRejected(_)));
        assert_eq!(store.find_by_id(1).await.unwrap(), before);

        let missing = service
            .update(TrialUpdate { id: 99, name: None, end_date: None })
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn set_status_only_accepts_terminal_states() {
        let service = service_with(Arc::new(InMemoryStore::new()));
        service.create(new_trial(1, "teste")).await.unwrap();

        let acquired = service.set_status(1, "ACQUIRED").await.unwrap();
        assert_eq!(acquired.status, TrialStatus::Acquired);

        assert!(matches!(
            service.set_status(1, "IN_TRIAL").await,
            Err(ServiceError::InvalidStatus(_))
        ));
        assert!(matches!(
            service.set_status(1, "nonsense").await,
            Err(ServiceError::InvalidStatus(_))
        ));
        assert!(matches!(
            service.set_status(42, "ACQUIRED").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_or_reports_missing() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store.clone());
        service.create(new_trial(1, "teste")).await.unwrap();

        service.delete(1).await.unwrap();
        assert!(store.find_by_id(1).await.unwrap().is_none());
        assert!(matches!(service.delete(1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn statistics_over_the_current_month() {
        let store = Arc::new(InMemoryStore::with_trials([
            stored(1, TrialStatus::Acquired, day(2026, 10, 5)),
            stored(2, TrialStatus::Withdrawn, day(2026, 10, 25)),
            stored(3, TrialStatus::Acquired, day(2026, 9, 5)),
        ]));
        let service = service_with(store);

        let stats = service.statistics().await.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.acquired_count, 1);
        assert_eq!(stats.withdrawn_count, 1);
        assert_eq!(stats.percent_acquired, 50.0);
        assert_eq!(stats.percent_withdrawn, 50.0);
        assert_eq!(stats.acquisition_rate, 50.0);
    }

    #[tokio::test]
    async fn statistics_without_trials_is_no_data() {
        let service = service_with(Arc::new(InMemoryStore::new()));
        assert!(matches!(service.statistics().await, Err(ServiceError::NoData(_))));
    }
}
