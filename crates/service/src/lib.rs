//! # Trial Service
//!
//! The use cases behind the HTTP API: create, list, list by status, update,
//! set status, delete and statistics.
//!
//! Storage goes through `TrialGateway`, which derives the status of every trial it
//! loads or saves. The use cases therefore never call the status engine's derivation
//! themselves; they only apply the explicit guards (`apply_field_update`,
//! `apply_explicit_status`) inside an atomic modification.

pub mod error;
pub mod gateway;
pub mod service;

pub use error::ServiceError;
pub use gateway::TrialGateway;
pub use service::{ListParams, TrialService};
