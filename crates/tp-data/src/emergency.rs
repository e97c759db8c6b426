//! Emergency response network.
//!
//! The emergency network is its own node set (`emergency_nodes.csv`, same
//! columns as `nodes.csv`) joined by roads that carry a live traffic load and
//! a coarse condition grade instead of a numeric score:
//!
//! ```csv
//! from,to,distance,capacity,traffic,grade
//! N1,N2,2,50,10,good
//! N3,F1,5,20,30,poor
//! ```
//!
//! Each row becomes an existing road whose traversal weight is
//! [`emergency_weight`] and whose condition score is [`RoadGrade::condition`].

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use tp_network::RoadRecord;

use crate::loader::{open, read_rows};
use crate::{DataError, DataResult};

/// Weight of one unit of traffic load, in distance units.
pub const TRAFFIC_WEIGHT: f64 = 0.1;

/// Multiplier applied to roads graded [`RoadGrade::Poor`].
pub const POOR_ROAD_PENALTY: f64 = 1.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RoadGrade {
    Good,
    Average,
    Poor,
}

impl RoadGrade {
    /// Condition score on the 0–10 scale used by existing roads.
    pub fn condition(self) -> f64 {
        match self {
            RoadGrade::Good    => 8.0,
            RoadGrade::Average => 5.0,
            RoadGrade::Poor    => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadGrade::Good    => "good",
            RoadGrade::Average => "average",
            RoadGrade::Poor    => "poor",
        }
    }
}

impl fmt::Display for RoadGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadGrade {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good"    => Ok(RoadGrade::Good),
            "average" => Ok(RoadGrade::Average),
            "poor"    => Ok(RoadGrade::Poor),
            other     => Err(DataError::Parse(format!(
                "unknown road grade {other:?}, expected good, average or poor"
            ))),
        }
    }
}

/// `distance + traffic × 0.1`, scaled by 1.5 on poor roads.
pub fn emergency_weight(distance: f64, traffic: f64, grade: RoadGrade) -> f64 {
    let weight = distance + traffic * TRAFFIC_WEIGHT;
    match grade {
        RoadGrade::Poor => weight * POOR_ROAD_PENALTY,
        _ => weight,
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EmergencyRoadRow {
    from:     String,
    to:       String,
    distance: f64,
    capacity: f64,
    traffic:  f64,
    grade:    String,
}

pub fn load_emergency_roads_reader<R: Read>(reader: R) -> DataResult<Vec<RoadRecord>> {
    read_rows::<EmergencyRoadRow, _>(reader)?
        .into_iter()
        .map(|row| {
            if !(row.traffic.is_finite() && row.traffic >= 0.0) {
                return Err(DataError::Parse(format!(
                    "emergency road {}-{}: traffic must be non-negative, got {}",
                    row.from, row.to, row.traffic
                )));
            }
            let grade: RoadGrade = row.grade.parse()?;
            let weight = emergency_weight(row.distance, row.traffic, grade);
            Ok(RoadRecord::existing(row.from, row.to, row.distance, row.capacity, grade.condition())
                .with_weight(weight))
        })
        .collect()
}

pub fn load_emergency_roads_csv(path: &Path) -> DataResult<Vec<RoadRecord>> {
    load_emergency_roads_reader(open(path)?)
}
