use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// An upcoming contest as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContestSummary {
    pub name: String,
    /// Absolute start time, when the platform exposes one. Niuke only
    /// publishes a rendered countdown.
    pub start_time: Option<DateTime<FixedOffset>>,
    pub countdown: String,
}

impl fmt::Display for ContestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.name, self.countdown)
    }
}
