//! Workout construction and derived fields.
//!
//! Pace, speed and description are always derived from the other fields.
//! Nothing in here validates: callers reject non-positive inputs first
//! (see [`crate::form`]), otherwise the derived metrics come out non-finite.

use crate::{Coords, DetailInput, Workout, WorkoutDetail, WorkoutFields, WorkoutId, WorkoutKind};
use chrono::{DateTime, Datelike, Local, Month, NaiveDate, Utc};

/// `"<Capitalized type> on <Month name> <day>"`
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    let month = Month::try_from(date.month() as u8)
        .map(|m| m.name())
        .unwrap_or("January");
    format!("{} on {} {}", kind.label(), month, date.day())
}

/// Pace in min/km
pub fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

/// Speed in km/h
pub fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

impl Workout {
    /// Create a running workout stamped with the current time
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coords, distance, duration, cadence)
    }

    pub fn running_at(
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        Self::build(
            date,
            coords,
            distance,
            duration,
            WorkoutDetail::Running { cadence, pace: 0.0 },
        )
    }

    /// Create a cycling workout stamped with the current time
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::cycling_at(Utc::now(), coords, distance, duration, elevation_gain)
    }

    pub fn cycling_at(
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::build(
            date,
            coords,
            distance,
            duration,
            WorkoutDetail::Cycling {
                elevation_gain,
                speed: 0.0,
            },
        )
    }

    /// Create a workout of whichever kind `fields` describes
    pub fn from_fields(date: DateTime<Utc>, coords: Coords, fields: &WorkoutFields) -> Self {
        match fields.detail {
            DetailInput::Running { cadence } => {
                Self::running_at(date, coords, fields.distance, fields.duration, cadence)
            }
            DetailInput::Cycling { elevation_gain } => Self::cycling_at(
                date,
                coords,
                fields.distance,
                fields.duration,
                elevation_gain,
            ),
        }
    }

    fn build(
        date: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        detail: WorkoutDetail,
    ) -> Self {
        let mut workout = Workout {
            id: WorkoutId::new(),
            date,
            coords,
            distance,
            duration,
            description: String::new(),
            clicks: 0,
            detail,
        };
        workout.recompute();
        workout
    }

    pub fn kind(&self) -> WorkoutKind {
        self.detail.kind()
    }

    /// Calendar day the description refers to
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    /// Re-derive pace or speed and the description
    ///
    /// Must run after every in-place change of distance, duration or detail.
    pub fn recompute(&mut self) {
        match &mut self.detail {
            WorkoutDetail::Running { pace: p, .. } => *p = pace(self.distance, self.duration),
            WorkoutDetail::Cycling { speed: s, .. } => *s = speed(self.distance, self.duration),
        }
        self.description = describe(self.kind(), self.local_date());
    }

    /// Overwrite the user-editable fields and recompute
    ///
    /// The variant follows `fields`, so an edit may turn a run into a ride.
    /// Id, date, coordinates and clicks are kept.
    pub fn apply(&mut self, fields: &WorkoutFields) {
        self.distance = fields.distance;
        self.duration = fields.duration;
        self.detail = match fields.detail {
            DetailInput::Running { cadence } => WorkoutDetail::Running { cadence, pace: 0.0 },
            DetailInput::Cycling { elevation_gain } => WorkoutDetail::Cycling {
                elevation_gain,
                speed: 0.0,
            },
        };
        self.recompute();
    }

    /// The user-editable fields of this workout
    pub fn fields(&self) -> WorkoutFields {
        let detail = match self.detail {
            WorkoutDetail::Running { cadence, .. } => DetailInput::Running { cadence },
            WorkoutDetail::Cycling { elevation_gain, .. } => {
                DetailInput::Cycling { elevation_gain }
            }
        };
        WorkoutFields {
            distance: self.distance,
            duration: self.duration,
            detail,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => Some(pace),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { speed, .. } => Some(speed),
            WorkoutDetail::Running { .. } => None,
        }
    }

    /// Popularity counter; no front end calls this yet
    pub fn click(&mut self) {
        self.clicks += 1;
    }
}
