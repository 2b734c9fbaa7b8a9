use analytics::AnalyticsError;
use core_types::CoreError;
use database::DbError;
use thiserror::Error;

/// Every way a use case can fail. The web layer maps each variant to a status code.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ModificationRejected(String),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("{0}")]
    MissingField(String),

    #[error("{0}")]
    NoData(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(DbError),
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidStatus(_) => ServiceError::InvalidStatus(message),
            CoreError::MissingField(_) => ServiceError::MissingField(message),
            CoreError::ModificationRejected(_) => ServiceError::ModificationRejected(message),
            CoreError::InvalidInput(_, _) => ServiceError::InvalidRequest(message),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => ServiceError::NotFound(format!("Trial not found: {id}")),
            DbError::Rejected(core) => core.into(),
            DbError::InvalidQuery(message) => ServiceError::InvalidRequest(message),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<AnalyticsError> for ServiceError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NoData => ServiceError::NoData(err.to_string()),
        }
    }
}
