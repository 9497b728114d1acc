use crate::error::HevyError;
use crate::models::Workout;
use crate::organizer::cell;
use log::info;
use std::fs;
use std::io;
use std::path::Path;

pub const FLAT_HEADERS: [&str; 9] = [
    "workout_id",
    "workout_title",
    "exercise_title",
    "set_index",
    "reps",
    "weight_kg",
    "duration_seconds",
    "notes",
    "superset_id",
];

/// Write every set of every workout into a single CSV file.
pub fn write_flat_csv(workouts: &[Workout], path: impl AsRef<Path>) -> Result<(), HevyError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(HevyError::io(path))?;
    let rows = write_flat_csv_to(workouts, io::BufWriter::new(file))?;
    info!("Wrote {} sets to {}", rows, path.display());
    Ok(())
}

/// Same as [`write_flat_csv`] but into any writer; returns the number of set rows.
pub fn write_flat_csv_to<W: io::Write>(workouts: &[Workout], writer: W) -> Result<usize, HevyError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(FLAT_HEADERS)?;

    let mut rows = 0;
    for workout in workouts {
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                csv.write_record([
                    cell(workout.id.as_deref()),
                    workout.title.clone(),
                    exercise.title.clone(),
                    cell(set.index),
                    cell(set.reps),
                    cell(set.weight_kg),
                    cell(set.duration_seconds),
                    exercise.notes.clone(),
                    cell(exercise.superset_id.as_deref()),
                ])?;
                rows += 1;
            }
        }
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(rows)
}
