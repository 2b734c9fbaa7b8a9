//! # Trial Statistics Engine
//!
//! Computes the monthly acquisition figures reported by the API.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** This crate has no knowledge of storage or HTTP. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** The `StatisticsEngine` takes a snapshot of trials and
//!   the current date and produces a `TrialStatistics` record.
//!
//! ## Public API
//!
//! - `StatisticsEngine`: The calculator.
//! - `TrialStatistics`: The six-field aggregate it produces.
//! - `AnalyticsError`: The errors that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatisticsEngine;
pub use error::AnalyticsError;
pub use report::TrialStatistics;
