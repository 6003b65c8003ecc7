//! CSV export of the workout list.

use crate::{Result, Workout, WorkoutDetail};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    date: String,
    lat: f64,
    lng: f64,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: Option<f64>,
    pace_min_per_km: Option<f64>,
    elevation_gain_m: Option<f64>,
    speed_km_per_h: Option<f64>,
    description: String,
}

impl From<&Workout> for CsvRow {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match workout.detail {
            WorkoutDetail::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            WorkoutDetail::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(elevation_gain), Some(speed)),
        };
        CsvRow {
            id: workout.id.to_string(),
            kind: workout.kind().to_string(),
            date: workout.date.to_rfc3339(),
            lat: workout.coords.lat,
            lng: workout.coords.lng,
            distance_km: workout.distance,
            duration_min: workout.duration,
            cadence_spm: cadence,
            pace_min_per_km: pace,
            elevation_gain_m: elevation_gain,
            speed_km_per_h: speed,
            description: workout.description.clone(),
        }
    }
}

/// Write every workout to `path`, replacing any existing file
///
/// Returns the number of rows written. The file is synced before returning.
pub fn export_csv(path: &Path, workouts: &[Workout]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for workout in workouts {
        writer.serialize(CsvRow::from(workout))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", workouts.len(), path);
    Ok(workouts.len())
}
