use serde::{Deserialize, Serialize};

/// Acquisition figures for the trials ending in the current month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialStatistics {
    pub total: usize,
    pub acquired_count: usize,
    pub withdrawn_count: usize,
    pub percent_acquired: f64,
    pub percent_withdrawn: f64,
    /// Same value as `percent_acquired`; kept as its own field for API consumers.
    pub acquisition_rate: f64,
}
