//! Time-of-day periods used by the traffic model.
//!
//! Traffic samples carry one volume reading per period; the period is the
//! only notion of time the congestion model has.  Transit scheduling uses
//! its own discrete slot horizon (see `TransitConfig::time_slots`).

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// One of the four periods a traffic sample is recorded for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// All periods in column order (`morning, afternoon, evening, night`).
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Column position of this period inside a `[f64; 4]` volume array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TimeOfDay::Morning   => 0,
            TimeOfDay::Afternoon => 1,
            TimeOfDay::Evening   => 2,
            TimeOfDay::Night     => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning   => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening   => "Evening",
            TimeOfDay::Night     => "Night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    /// Case-insensitive; accepts the names used as CSV column headers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning"   => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening"   => Ok(TimeOfDay::Evening),
            "night"     => Ok(TimeOfDay::Night),
            other => Err(CoreError::Parse(format!(
                "invalid time of day {other:?}: expected morning, afternoon, evening or night"
            ))),
        }
    }
}
