//! # Trial Status Engine
//!
//! Keeps a trial's `status` consistent with its `end_date`, and guards the two
//! ways a caller can change a trial.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. Every function takes the current date as an argument,
//!   so the result depends only on its inputs.
//! - **Idempotent Derivation:** `derive_status` can be applied any number of times on
//!   the same day with the same outcome. The service layer applies it on every load
//!   and before every save.
//!
//! ## Public API
//!
//! - `status_for`: the date rule on its own.
//! - `derive_status`: applies the date rule to a trial unless it is terminal.
//! - `apply_explicit_status`: the only way into `ACQUIRED` / `WITHDRAWN`.
//! - `apply_field_update`: edits name and end date of a non-terminal trial.

pub mod engine;

pub use engine::{apply_explicit_status, apply_field_update, derive_status, status_for};
