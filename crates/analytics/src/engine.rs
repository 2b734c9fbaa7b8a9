use crate::error::AnalyticsError;
use crate::report::TrialStatistics;
use chrono::{Datelike, NaiveDate};
use core_types::{Trial, TrialStatus};

/// A stateless calculator for the monthly acquisition statistics.
#[derive(Debug, Default)]
pub struct StatisticsEngine {}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the statistics for the trials whose end date falls in the
    /// same month as `today`.
    ///
    /// Only the month number is compared, so trials ending in the same month of
    /// another year are counted as well.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::NoData` when `trials` is empty. An input whose trials all
    /// fall outside the month yields a zeroed report instead.
    pub fn calculate(
        &self,
        trials: &[Trial],
        today: NaiveDate,
    ) -> Result<TrialStatistics, AnalyticsError> {
        if trials.is_empty() {
            return Err(AnalyticsError::NoData);
        }

        let in_month: Vec<&Trial> = trials
            .iter()
            .filter(|trial| trial.end_date.month() == today.month())
            .collect();

        let total = in_month.len();
        let acquired_count = count_with_status(&in_month, TrialStatus::Acquired);
        let withdrawn_count = count_with_status(&in_month, TrialStatus::Withdrawn);
        let percent_acquired = percentage(acquired_count, total);
        let percent_withdrawn = percentage(withdrawn_count, total);

        tracing::debug!(
            scanned = trials.len(),
            total,
            acquired_count,
            withdrawn_count,
            "Calculated monthly trial statistics."
        );

        Ok(TrialStatistics {
            total,
            acquired_count,
            withdrawn_count,
            percent_acquired,
            percent_withdrawn,
            acquisition_rate: percent_acquired,
        })
    }
}

fn count_with_status(trials: &[&Trial], status: TrialStatus) -> usize {
    trials.iter().filter(|trial| trial.status == status).count()
}

fn percentage(part: usize, total: usize) -> f64 {
    if total > 0 {
        part as f64 * 100.0 / total as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trial(id: i64, end_date: NaiveDate, status: TrialStatus) -> Trial {
        Trial {
            id,
            name: format!("trial-{id}"),
            status,
            end_date,
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = StatisticsEngine::new().calculate(&[], day(2026, 10, 19)).unwrap_err();
        assert_eq!(err, AnalyticsError::NoData);
    }

    #[test]
    fn one_acquired_one_withdrawn() {
        let today = day(2026, 10, 19);
        let trials = vec![
            trial(1, day(2026, 10, 3), TrialStatus::Acquired),
            trial(2, day(2026, 10, 28), TrialStatus::Withdrawn),
        ];

        let stats = StatisticsEngine::new().calculate(&trials, today).unwrap();

        assert_eq!(
            stats,
            TrialStatistics {
                total: 2,
                acquired_count: 1,
                withdrawn_count: 1,
                percent_acquired: 50.0,
                percent_withdrawn: 50.0,
                acquisition_rate: 50.0,
            }
        );
    }

    #[test]
    fn other_months_are_excluded() {
        let today = day(2026, 10, 19);
        let trials = vec![
            trial(1, day(2026, 10, 3), TrialStatus::Acquired),
            trial(2, day(2026, 10, 20), TrialStatus::InTrial),
            trial(3, day(2026, 10, 19), TrialStatus::TrialFinalized),
            trial(4, day(2026, 9, 30), TrialStatus::Acquired),
            trial(5, day(2026, 11, 1), TrialStatus::Withdrawn),
        ];

        let stats = StatisticsEngine::new().calculate(&trials, today).unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.acquired_count, 1);
        assert_eq!(stats.withdrawn_count, 0);
        assert!((stats.percent_acquired - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.percent_withdrawn, 0.0);
        assert_eq!(stats.acquisition_rate, stats.percent_acquired);
    }

    #[test]
    fn same_month_of_another_year_is_counted() {
        let today = day(2026, 10, 19);
        let trials = vec![
            trial(1, day(2024, 10, 5), TrialStatus::Acquired),
            trial(2, day(2026, 10, 5), TrialStatus::InTrial),
        ];

        let stats = StatisticsEngine::new().calculate(&trials, today).unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.acquired_count, 1);
        assert_eq!(stats.percent_acquired, 50.0);
    }

    #[test]
    fn nothing_in_month_yields_zeroed_report() {
        let trials = vec![trial(1, day(2026, 3, 5), TrialStatus::Acquired)];
        let stats = StatisticsEngine::new().calculate(&trials, day(2026, 10, 19)).unwrap();
        assert_eq!(stats, TrialStatistics::default());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let stats = TrialStatistics {
            total: 4,
            acquired_count: 1,
            withdrawn_count: 2,
            percent_acquired: 25.0,
            percent_withdrawn: 50.0,
            acquisition_rate: 25.0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total": 4,
                "acquiredCount": 1,
                "withdrawnCount": 2,
                "percentAcquired": 25.0,
                "percentWithdrawn": 50.0,
                "acquisitionRate": 25.0
            })
        );
    }
}
