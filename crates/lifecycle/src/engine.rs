use chrono::NaiveDate;
use core_types::{CoreError, Trial, TrialStatus, TrialUpdate};
use std::cmp::Ordering;

/// The status a non-terminal trial has on `today`, given its end date.
pub fn status_for(end_date: NaiveDate, today: NaiveDate) -> TrialStatus {
    match end_date.cmp(&today) {
        Ordering::Less => TrialStatus::TrialExpired,
        Ordering::Equal => TrialStatus::TrialFinalized,
        Ordering::Greater => TrialStatus::InTrial,
    }
}

/// Recomputes `trial.status` from its end date. Terminal trials are left alone.
///
/// Returns true when the status changed.
pub fn derive_status(trial: &mut Trial, today: NaiveDate) -> bool {
    if !trial.is_mutable() {
        return false;
    }
    let derived = status_for(trial.end_date, today);
    if derived == trial.status {
        return false;
    }
    tracing::debug!(
        trial_id = trial.id,
        from = %trial.status,
        to = %derived,
        "Derived new trial status."
    );
    trial.status = derived;
    true
}

/// Moves a trial into a terminal state.
///
/// Only `ACQUIRED` and `WITHDRAWN` may be requested. The assignment skips derivation
/// entirely and applies even when the trial is already terminal.
pub fn apply_explicit_status(trial: &mut Trial, requested: TrialStatus) -> Result<(), CoreError> {
    if !requested.is_terminal() {
        return Err(CoreError::InvalidStatus(format!(
            "Status must be {} or {} to update a trial, got {}.",
            TrialStatus::Acquired,
            TrialStatus::Withdrawn,
            requested
        )));
    }
    trial.status = requested;
    Ok(())
}

/// Overwrites the provided fields of a non-terminal trial, then re-derives its status.
pub fn apply_field_update(
    trial: &mut Trial,
    update: &TrialUpdate,
    today: NaiveDate,
) -> Result<(), CoreError> {
    if !trial.is_mutable() {
        return Err(CoreError::ModificationRejected(trial.id));
    }
    if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(CoreError::InvalidInput(
            "name".to_string(),
            "must not be blank".to_string(),
        ));
    }

    if let Some(name) = &update.name {
        trial.name = name.clone();
    }
    if let Some(end_date) = update.end_date {
        trial.end_date = end_date;
    }
    derive_status(trial, today);
    Ok(())
}
