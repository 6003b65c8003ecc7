//! Workout form input and validation.
//!
//! The same rules apply to creating and editing: distance, duration and the
//! field belonging to the selected type must be finite and strictly positive.

use crate::{DetailInput, Workout, WorkoutDetail, WorkoutFields, WorkoutKind};

/// Raw numbers read from the form
///
/// Missing or unparseable fields are `NaN`, which validation rejects.
#[derive(Clone, Debug)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub cadence: f64,
    pub elevation_gain: f64,
}

/// Why a form submission was refused
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("distance must be a positive number, got {0}")]
    Distance(f64),

    #[error("duration must be a positive number, got {0}")]
    Duration(f64),

    #[error("cadence must be a positive number, got {0}")]
    Cadence(f64),

    #[error("elevation gain must be a positive number, got {0}")]
    ElevationGain(f64),
}

/// Coerce a form field to a number
///
/// Empty or non-numeric text becomes `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl FormInput {
    /// Build input from text fields the way a browser form would hand them over
    pub fn parse(
        kind: WorkoutKind,
        distance: &str,
        duration: &str,
        cadence: &str,
        elevation_gain: &str,
    ) -> Self {
        Self {
            kind,
            distance: parse_number(distance),
            duration: parse_number(duration),
            cadence: parse_number(cadence),
            elevation_gain: parse_number(elevation_gain),
        }
    }

    /// Check every field the selected type needs
    ///
    /// The field of the other type is ignored.
    pub fn validate(&self) -> Result<WorkoutFields, ValidationError> {
        if !positive(self.distance) {
            return Err(ValidationError::Distance(self.distance));
        }
        if !positive(self.duration) {
            return Err(ValidationError::Duration(self.duration));
        }
        let detail = match self.kind {
            WorkoutKind::Running => {
                if !positive(self.cadence) {
                    return Err(ValidationError::Cadence(self.cadence));
                }
                DetailInput::Running {
                    cadence: self.cadence,
                }
            }
            WorkoutKind::Cycling => {
                if !positive(self.elevation_gain) {
                    return Err(ValidationError::ElevationGain(self.elevation_gain));
                }
                DetailInput::Cycling {
                    elevation_gain: self.elevation_gain,
                }
            }
        };
        Ok(WorkoutFields {
            distance: self.distance,
            duration: self.duration,
            detail,
        })
    }
}

impl From<&Workout> for FormInput {
    fn from(workout: &Workout) -> Self {
        let (cadence, elevation_gain) = match workout.detail {
            WorkoutDetail::Running { cadence, .. } => (cadence, f64::NAN),
            WorkoutDetail::Cycling { elevation_gain, .. } => (f64::NAN, elevation_gain),
        };
        Self {
            kind: workout.kind(),
            distance: workout.distance,
            duration: workout.duration,
            cadence,
            elevation_gain,
        }
    }
}

/// What the form shows when it opens
///
/// Only the row for `kind`'s type-specific field is visible.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPrefill {
    pub kind: WorkoutKind,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub cadence: Option<f64>,
    pub elevation_gain: Option<f64>,
}

impl FormPrefill {
    /// Blank form for a new workout
    pub fn empty(kind: WorkoutKind) -> Self {
        Self {
            kind,
            distance: None,
            duration: None,
            cadence: None,
            elevation_gain: None,
        }
    }

    /// Whether the cadence row is shown (otherwise the elevation row is)
    pub fn shows_cadence(&self) -> bool {
        self.kind == WorkoutKind::Running
    }

    /// Switch the visible type-specific row, keeping what was typed
    pub fn with_kind(mut self, kind: WorkoutKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<&Workout> for FormPrefill {
    fn from(workout: &Workout) -> Self {
        let mut prefill = FormPrefill::empty(workout.kind());
        prefill.distance = Some(workout.distance);
        prefill.duration = Some(workout.duration);
        match workout.detail {
            WorkoutDetail::Running { cadence, .. } => prefill.cadence = Some(cadence),
            WorkoutDetail::Cycling { elevation_gain, .. } => {
                prefill.elevation_gain = Some(elevation_gain)
            }
        }
        prefill
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coords;

    fn running(distance: f64, duration: f64, cadence: f64) -> FormInput {
        FormInput {
            kind: WorkoutKind::Running,
            distance,
            duration,
            cadence,
            elevation_gain: f64::NAN,
        }
    }

    fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> FormInput {
        FormInput {
            kind: WorkoutKind::Cycling,
            distance,
            duration,
            cadence: f64::NAN,
            elevation_gain,
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 5.2 "), 5.2);
        assert!(parse_number("").is_nan());
        assert!(parse_number("abc").is_nan());
    }

    #[test]
    fn test_valid_running() {
        let fields = running(5.2, 24.0, 178.0).validate().unwrap();
        assert_eq!(fields.detail, DetailInput::Running { cadence: 178.0 });
    }

    #[test]
    fn test_valid_cycling_ignores_cadence() {
        let fields = cycling(27.0, 295.0, 525.0).validate().unwrap();
        assert_eq!(
            fields.detail,
            DetailInput::Cycling {
                elevation_gain: 525.0
            }
        );
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            running(0.0, 24.0, 178.0).validate(),
            Err(ValidationError::Distance(0.0))
        );
        assert_eq!(
            running(5.0, 0.0, 178.0).validate(),
            Err(ValidationError::Duration(0.0))
        );
        assert_eq!(
            running(5.0, 24.0, 0.0).validate(),
            Err(ValidationError::Cadence(0.0))
        );
        assert_eq!(
            cycling(5.0, 24.0, 0.0).validate(),
            Err(ValidationError::ElevationGain(0.0))
        );
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        assert!(running(-1.0, 24.0, 178.0).validate().is_err());
        assert!(running(f64::INFINITY, 24.0, 178.0).validate().is_err());
        assert!(running(5.0, f64::NAN, 178.0).validate().is_err());
        assert!(cycling(5.0, 24.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_empty_type_specific_field_rejected() {
        let input = FormInput::parse(WorkoutKind::Running, "5", "25", "", "100");
        assert!(matches!(
            input.validate(),
            Err(ValidationError::Cadence(v)) if v.is_nan()
        ));
    }

    #[test]
    fn test_prefill_from_workout() {
        let ride = Workout::cycling(Coords::new(0.0, 0.0), 27.0, 295.0, 525.0);
        let prefill = FormPrefill::from(&ride);
        assert!(!prefill.shows_cadence());
        assert_eq!(prefill.elevation_gain, Some(525.0));
        assert_eq!(prefill.cadence, None);
        assert_eq!(prefill.distance, Some(27.0));
    }

    #[test]
    fn test_input_from_workout_validates_to_same_fields() {
        let run = Workout::running(Coords::new(0.0, 0.0), 5.2, 24.0, 178.0);
        let fields = FormInput::from(&run).validate().unwrap();
        assert_eq!(fields, run.fields());
    }
}
