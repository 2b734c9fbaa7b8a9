use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("Trial id and name are required (missing: {0}).")]
    MissingField(&'static str),

    #[error("Trial {0} is already acquired or withdrawn and can no longer be updated.")]
    ModificationRejected(i64),
}
