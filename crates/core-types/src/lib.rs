pub mod clock;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use clock::{Clock, FixedClock, SystemClock};
pub use enums::TrialStatus;
pub use error::CoreError;
pub use structs::{NewTrial, Trial, TrialId, TrialUpdate};
