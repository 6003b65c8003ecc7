//! Deterministic mapping from a workout to its marker and list entry.

use crate::{Coords, Workout, WorkoutDetail, WorkoutId, WorkoutKind};

/// A map marker with an always-open popup
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub workout_id: WorkoutId,
    pub coords: Coords,
    /// Icon followed by the workout description
    pub popup: String,
    /// Popup style class, `"<type>-popup"`
    pub class: String,
}

/// One line of details in a list entry
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// A rendered list entry, carrying its edit and delete controls
#[derive(Clone, Debug, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub rows: Vec<DetailRow>,
}

pub fn marker(workout: &Workout) -> Marker {
    Marker {
        workout_id: workout.id.clone(),
        coords: workout.coords,
        popup: format!("{} {}", workout.kind().icon(), workout.description),
        class: format!("{}-popup", workout.kind()),
    }
}

pub fn entry(workout: &Workout) -> ListEntry {
    let mut rows = vec![
        row(workout.kind().icon(), format_number(workout.distance), "km"),
        row("⏱", format_number(workout.duration), "min"),
    ];

    match workout.detail {
        WorkoutDetail::Running { cadence, pace } => {
            rows.push(row("⚡️", format!("{:.1}", pace), "min/km"));
            rows.push(row("🦶🏼", format_number(cadence), "spm"));
        }
        WorkoutDetail::Cycling {
            elevation_gain,
            speed,
        } => {
            rows.push(row("⚡️", format!("{:.1}", speed), "km/h"));
            rows.push(row("⛰", format_number(elevation_gain), "m"));
        }
    }

    ListEntry {
        id: workout.id.clone(),
        kind: workout.kind(),
        title: workout.description.clone(),
        rows,
    }
}

fn row(icon: &'static str, value: String, unit: &'static str) -> DetailRow {
    DetailRow { icon, value, unit }
}

/// Whole numbers print without a fractional part (`24`, not `24.0`)
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_entry_rows() {
        let run = Workout::running(Coords::new(39.0, -12.0), 5.2, 24.0, 178.0);
        let entry = entry(&run);

        assert_eq!(entry.id, run.id);
        assert_eq!(entry.title, run.description);
        let rendered: Vec<(String, &str)> =
            entry.rows.iter().map(|r| (r.value.clone(), r.unit)).collect();
        assert_eq!(
            rendered,
            vec![
                ("5.2".to_string(), "km"),
                ("24".to_string(), "min"),
                ("4.6".to_string(), "min/km"),
                ("178".to_string(), "spm"),
            ]
        );
    }

    #[test]
    fn test_cycling_entry_rows() {
        let ride = Workout::cycling(Coords::new(39.0, -12.0), 27.0, 295.0, 525.0);
        let entry = entry(&ride);

        let units: Vec<&str> = entry.rows.iter().map(|r| r.unit).collect();
        assert_eq!(units, vec!["km", "min", "km/h", "m"]);
        assert_eq!(entry.rows[2].value, "5.5");
        assert_eq!(entry.rows[3].value, "525");
        assert_eq!(entry.rows[0].icon, "🚴‍♀️");
    }

    #[test]
    fn test_marker_popup() {
        let run = Workout::running(Coords::new(39.0, -12.0), 5.2, 24.0, 178.0);
        let marker = marker(&run);

        assert_eq!(marker.coords, Coords::new(39.0, -12.0));
        assert_eq!(marker.popup, format!("🏃‍♂️ {}", run.description));
        assert_eq!(marker.class, "running-popup");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let ride = Workout::cycling(Coords::new(1.0, 2.0), 12.5, 40.0, 80.0);
        assert_eq!(entry(&ride), entry(&ride.clone()));
        assert_eq!(marker(&ride), marker(&ride.clone()));
    }
}
