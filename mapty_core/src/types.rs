//! Core domain types for Mapty.
//!
//! This module defines the fundamental types used throughout the system:
//! - Map coordinates
//! - Workout ids
//! - Workout kinds and their type-specific payloads
//! - The persisted workout record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Coordinates
// ============================================================================

/// A latitude/longitude pair, stored as `[lat, lng]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"` (whitespace around either number is ignored)
impl FromStr for Coords {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| crate::Error::Other(format!("Expected LAT,LNG, got '{}'", s)))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| crate::Error::Other(format!("Invalid coordinate '{}'", v.trim())))
        };
        let (lat, lng) = (parse(lat)?, parse(lng)?);
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(crate::Error::Other(format!(
                "Coordinates out of range: {},{}",
                lat, lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

// ============================================================================
// Workout Ids
// ============================================================================

/// Opaque identifier of a workout
///
/// New workouts get a UUID v4. Stored ids are kept as written, so records
/// saved by other front ends (which use timestamp strings) load unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WorkoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts any non-blank token
impl FromStr for WorkoutId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(crate::Error::Other("Workout id must not be empty".into()));
        }
        Ok(Self(s.to_string()))
    }
}

// ============================================================================
// Workout Kinds
// ============================================================================

/// Discriminator of a workout record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Stored discriminator (`"running"` / `"cycling"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "running" | "run" => Ok(WorkoutKind::Running),
            "cycling" | "ride" => Ok(WorkoutKind::Cycling),
            other => Err(crate::Error::Other(format!(
                "Unknown workout type: {} (expected running or cycling)",
                other
            ))),
        }
    }
}

// ============================================================================
// Workout Record
// ============================================================================

/// Type-specific payload of a workout, tagged by `type` when serialized
///
/// `pace` and `speed` are derived. They default when missing from stored
/// data and are recomputed on load.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetail {
    /// Cadence in steps/min, pace in min/km
    Running {
        cadence: f64,
        #[serde(default)]
        pace: f64,
    },
    /// Elevation gain in meters, speed in km/h
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default)]
        speed: f64,
    },
}

impl WorkoutDetail {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetail::Running { .. } => WorkoutKind::Running,
            WorkoutDetail::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A logged workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: WorkoutId,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(flatten)]
    pub detail: WorkoutDetail,
}

/// User-entered fields shared by creation and edit, already validated
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutFields {
    pub distance: f64,
    pub duration: f64,
    pub detail: DetailInput,
}

/// The type-specific field a user enters
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetailInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl DetailInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            DetailInput::Running { .. } => WorkoutKind::Running,
            DetailInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_serialize_as_pair() {
        let json = serde_json::to_string(&Coords::new(39.0, -12.5)).unwrap();
        assert_eq!(json, "[39.0,-12.5]");

        let parsed: Coords = serde_json::from_str("[51.5, -0.12]").unwrap();
        assert_eq!(parsed, Coords::new(51.5, -0.12));
    }

    #[test]
    fn test_coords_from_str() {
        assert_eq!("39, -12".parse::<Coords>().unwrap(), Coords::new(39.0, -12.0));
        assert!("39".parse::<Coords>().is_err());
        assert!("abc,1".parse::<Coords>().is_err());
        assert!("91,0".parse::<Coords>().is_err());
    }

    #[test]
    fn test_workout_id_accepts_any_token() {
        let id: WorkoutId = "1718366400000".parse().unwrap();
        assert_eq!(id.as_str(), "1718366400000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1718366400000\"");
        assert!("  ".parse::<WorkoutId>().is_err());

        let fresh = WorkoutId::new();
        assert!(uuid::Uuid::parse_str(fresh.as_str()).is_ok());
        assert_ne!(fresh, WorkoutId::new());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Running".parse::<WorkoutKind>().unwrap(), WorkoutKind::Running);
        assert_eq!("cycling".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cycling);
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn test_detail_is_tagged_by_type() {
        let detail = WorkoutDetail::Cycling {
            elevation_gain: 525.0,
            speed: 5.5,
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["type"], "cycling");
        assert_eq!(value["elevationGain"], 525.0);
    }
}
