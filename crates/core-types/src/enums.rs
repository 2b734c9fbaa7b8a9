use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle state of a trial.
///
/// `InTrial`, `TrialFinalized` and `TrialExpired` are derived from the end date.
/// `Acquired` and `Withdrawn` are terminal and only reachable by an explicit request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialStatus {
    #[default]
    InTrial,
    Acquired,
    Withdrawn,
    TrialFinalized,
    TrialExpired,
}

impl TrialStatus {
    pub const ALL: [TrialStatus; 5] = [
        TrialStatus::InTrial,
        TrialStatus::Acquired,
        TrialStatus::Withdrawn,
        TrialStatus::TrialFinalized,
        TrialStatus::TrialExpired,
    ];

    /// Returns true for the states that freeze a trial.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrialStatus::Acquired | TrialStatus::Withdrawn)
    }

    /// The canonical text form, as stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialStatus::InTrial => "IN_TRIAL",
            TrialStatus::Acquired => "ACQUIRED",
            TrialStatus::Withdrawn => "WITHDRAWN",
            TrialStatus::TrialFinalized => "TRIAL_FINALIZED",
            TrialStatus::TrialExpired => "TRIAL_EXPIRED",
        }
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a status case-insensitively, so `"acquired"` and `"ACQUIRED"` are equivalent.
impl FromStr for TrialStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        TrialStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| CoreError::InvalidStatus(format!("Invalid trial status: {s}")))
    }
}
