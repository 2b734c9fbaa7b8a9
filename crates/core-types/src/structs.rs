use crate::enums::TrialStatus;
use crate::error::CoreError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Trials are keyed by an externally supplied, positive identifier.
pub type TrialId = i64;

/// An item under time-boxed evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub id: TrialId,
    pub name: String,
    pub status: TrialStatus,
    pub end_date: NaiveDate,
}

impl Trial {
    /// Builds a trial in the default `IN_TRIAL` state.
    pub fn new(id: TrialId, name: impl Into<String>, end_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            status: TrialStatus::default(),
            end_date,
        }
    }

    /// Validates a creation request and fills in the defaults.
    ///
    /// The end date is `today + trial_length_days`; both are supplied by the caller
    /// so that the result does not depend on the wall clock.
    pub fn from_request(
        request: NewTrial,
        today: NaiveDate,
        trial_length_days: u32,
    ) -> Result<Self, CoreError> {
        let id = request.id.ok_or(CoreError::MissingField("id"))?;
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(CoreError::MissingField("name"))?;

        if id <= 0 {
            return Err(CoreError::InvalidInput(
                "id".to_string(),
                format!("must be a positive value, got {id}"),
            ));
        }

        let end_date = today
            .checked_add_days(Days::new(u64::from(trial_length_days)))
            .ok_or_else(|| {
                CoreError::InvalidInput("endDate".to_string(), "date out of range".to_string())
            })?;

        Ok(Self::new(id, name, end_date))
    }

    /// A trial can be edited until it reaches a terminal state.
    pub fn is_mutable(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// The body of a creation request. Both fields are required; they are optional
/// here so that a missing one is reported as such instead of as a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrial {
    pub id: Option<TrialId>,
    pub name: Option<String>,
}

/// A partial update. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialUpdate {
    pub id: TrialId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn creation_defaults_status_and_end_date() {
        let request = NewTrial { id: Some(1), name: Some("x".into()) };
        let trial = Trial::from_request(request, day(2026, 10, 19), 4).unwrap();

        assert_eq!(trial.id, 1);
        assert_eq!(trial.name, "x");
        assert_eq!(trial.status, TrialStatus::InTrial);
        assert_eq!(trial.end_date, day(2026, 10, 23));
    }

    #[test]
    fn creation_rolls_over_month_end() {
        let request = NewTrial { id: Some(7), name: Some("rollover".into()) };
        let trial = Trial::from_request(request, day(2026, 12, 30), 4).unwrap();
        assert_eq!(trial.end_date, day(2027, 1, 3));
    }

    #[test]
    fn creation_requires_id_and_name() {
        let today = day(2026, 10, 19);

        let missing_id = NewTrial { id: None, name: Some("x".into()) };
        assert_eq!(
            Trial::from_request(missing_id, today, 4).unwrap_err(),
            CoreError::MissingField("id")
        );

        let missing_name = NewTrial { id: Some(1), name: None };
        assert_eq!(
            Trial::from_request(missing_name, today, 4).unwrap_err(),
            CoreError::MissingField("name")
        );

        let blank_name = NewTrial { id: Some(1), name: Some("   ".into()) };
        assert_eq!(
            Trial::from_request(blank_name, today, 4).unwrap_err(),
            CoreError::MissingField("name")
        );
    }

    #[test]
    fn creation_rejects_non_positive_id() {
        let request = NewTrial { id: Some(0), name: Some("x".into()) };
        let err = Trial::from_request(request, day(2026, 10, 19), 4).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "id"));
    }

    #[test]
    fn terminal_trials_are_not_mutable() {
        let mut trial = Trial::new(1, "x", day(2026, 10, 19));
        assert!(trial.is_mutable());
        trial.status = TrialStatus::Withdrawn;
        assert!(!trial.is_mutable());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let trial = Trial::new(3, "demo", day(2026, 10, 23));
        let json = serde_json::to_value(&trial).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "demo",
                "status": "IN_TRIAL",
                "endDate": "2026-10-23"
            })
        );
    }

    #[test]
    fn update_fields_default_to_absent() {
        let update: TrialUpdate = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(update, TrialUpdate { id: 5, name: None, end_date: None });
    }
}
