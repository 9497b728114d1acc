//! Lays workouts out on disk, one directory per workout named
//! `{date}_{title}`, each holding a plain-text summary and a CSV of sets.

use crate::error::HevyError;
use crate::models::{Exercise, Set, Workout};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use std::fmt::{Display, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE_NAME: &str = "workout_summary.txt";
pub const EXERCISES_FILE_NAME: &str = "exercises.csv";

pub const EXERCISE_HEADERS: [&str; 8] = [
    "Exercise",
    "Exercise Notes",
    "Set Number",
    "Repetitions",
    "Weight (kg)",
    "Duration (seconds)",
    "Superset Group",
    "Coach Feedback",
];

const INVALID_FILENAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];
const NOT_AVAILABLE: &str = "N/A";
const NOTES_PLACEHOLDER: &str = "[Add your general notes about this workout here]";

/// What to do with a workout that has no usable `start_time`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the whole run with [`HevyError::MalformedRecord`].
    #[default]
    Fail,
    /// Log a warning and continue with the next workout.
    Skip,
}

#[derive(Debug, Clone)]
pub struct Organizer {
    output_dir: PathBuf,
    malformed: MalformedPolicy,
}

impl Organizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            malformed: MalformedPolicy::default(),
        }
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every workout, in order, below the output directory.
    ///
    /// Existing workout directories with the same name are replaced, so
    /// re-running on the same data yields identical output.
    pub fn organize(&self, workouts: &[Workout]) -> Result<PathBuf, HevyError> {
        fs::create_dir_all(&self.output_dir).map_err(HevyError::io(&self.output_dir))?;

        let mut written = 0usize;
        for workout in workouts {
            match self.organize_workout(workout) {
                Ok(_) => written += 1,
                Err(err @ HevyError::MalformedRecord { .. })
                    if self.malformed == MalformedPolicy::Skip =>
                {
                    warn!("Skipping workout: {}", err);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            "Organized {} of {} workouts in {}",
            written,
            workouts.len(),
            self.output_dir.display()
        );
        Ok(self.output_dir.clone())
    }

    /// Write a single workout and return its directory.
    pub fn organize_workout(&self, workout: &Workout) -> Result<PathBuf, HevyError> {
        let date = workout_date(workout)?;
        let duration = duration_minutes(workout.start_time.as_deref(), workout.end_time.as_deref())?;
        let folder = folder_name(date, &workout.title);
        let workout_dir = self.output_dir.join(&folder);

        if workout_dir.exists() {
            debug!(
                "Removing existing workout folder: {}",
                workout_dir.display()
            );
            fs::remove_dir_all(&workout_dir).map_err(HevyError::io(&workout_dir))?;
        }
        fs::create_dir_all(&workout_dir).map_err(HevyError::io(&workout_dir))?;

        let summary_path = workout_dir.join(SUMMARY_FILE_NAME);
        let summary = render_summary(workout, date, duration);
        fs::write(&summary_path, summary).map_err(HevyError::io(&summary_path))?;
        debug!("Created {}", summary_path.display());

        let csv_path = workout_dir.join(EXERCISES_FILE_NAME);
        let file = fs::File::create(&csv_path).map_err(HevyError::io(&csv_path))?;
        write_exercises(workout, io::BufWriter::new(file))?;
        debug!("Created {}", csv_path.display());

        Ok(workout_dir)
    }
}

/// Organize `workouts` below `output_dir`, failing on the first malformed record.
pub fn organize(workouts: &[Workout], output_dir: impl AsRef<Path>) -> Result<PathBuf, HevyError> {
    Organizer::new(output_dir.as_ref()).organize(workouts)
}

/// Date part of the workout's `start_time`, i.e. everything before the first `T`.
///
/// The date becomes part of a directory name, so it must be a plain
/// `YYYY-MM-DD` calendar date.
pub fn workout_date(workout: &Workout) -> Result<&str, HevyError> {
    let malformed = |reason| HevyError::MalformedRecord {
        workout_id: workout.id.clone(),
        reason,
    };
    let start = workout
        .start_time
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("missing start_time"))?;
    let date = start.split('T').next().unwrap_or(start);
    if date.len() != 10 || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(malformed("start_time does not begin with a YYYY-MM-DD date"));
    }
    Ok(date)
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub fn folder_name(date: &str, title: &str) -> String {
    format!("{}_{}", date, sanitize_filename(title))
}

/// Minutes between two ISO-8601 timestamps, rounded to one decimal place
/// with ties to even.
/// `None` when either end is missing.
pub fn duration_minutes(
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<Option<f64>, HevyError> {
    let (Some(start), Some(end)) = (
        start_time.filter(|s| !s.is_empty()),
        end_time.filter(|s| !s.is_empty()),
    ) else {
        return Ok(None);
    };

    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    Ok(Some((seconds / 60.0 * 10.0).round_ties_even() / 10.0))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, HevyError> {
    let normalized = match raw.strip_suffix('Z') {
        Some(prefix) => format!("{}+00:00", prefix),
        None => raw.to_string(),
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(ts);
    }
    // No offset: read as UTC.
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| HevyError::InvalidTimestamp(raw.to_string()))
}

/// Total set count per exercise title, in first-seen order.
pub fn exercise_tally(workout: &Workout) -> Vec<(&str, usize)> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for exercise in &workout.exercises {
        let title = exercise.title.as_str();
        match tally.iter_mut().find(|(t, _)| *t == title) {
            Some((_, count)) => *count += exercise.sets.len(),
            None => tally.push((title, exercise.sets.len())),
        }
    }
    tally
}

fn render_summary(workout: &Workout, date: &str, duration: Option<f64>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Workout: {}", workout.title);
    let _ = writeln!(out, "Date: {}", date);
    let _ = writeln!(
        out,
        "Start Time: {}",
        workout.start_time.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(
        out,
        "End Time: {}",
        workout.end_time.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    match duration {
        Some(minutes) => {
            let _ = writeln!(out, "Total Duration: {:.1} minutes", minutes);
        }
        None => {
            let _ = writeln!(out, "Total Duration: {}", NOT_AVAILABLE);
        }
    }
    out.push('\n');

    if let Some(description) = workout.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "Description: {}", description);
        out.push('\n');
    }

    out.push_str("Exercise Summary:\n");
    for (title, count) in exercise_tally(workout) {
        let _ = writeln!(out, "- {}: {} sets", title, count);
    }

    out.push('\n');
    out.push_str("General Notes:\n");
    out.push_str(NOTES_PLACEHOLDER);
    out.push('\n');
    out
}

/// The human-readable summary written to `workout_summary.txt`.
pub fn summary_text(workout: &Workout) -> Result<String, HevyError> {
    let date = workout_date(workout)?;
    let duration = duration_minutes(workout.start_time.as_deref(), workout.end_time.as_deref())?;
    Ok(render_summary(workout, date, duration))
}

/// Write one CSV row per set, preceded by the fixed header row.
pub fn write_exercises<W: io::Write>(workout: &Workout, writer: W) -> Result<(), HevyError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXERCISE_HEADERS)?;
    for exercise in &workout.exercises {
        for set in &exercise.sets {
            let row = exercise_row(exercise, set);
            debug!("[{}] {:?}", workout.title, row);
            csv.write_record(&row)?;
        }
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn exercise_row(exercise: &Exercise, set: &Set) -> [String; 8] {
    [
        exercise.title.clone(),
        exercise.notes.clone(),
        cell(set.index),
        cell(set.reps),
        cell(set.weight_kg),
        cell(set.duration_seconds),
        cell(exercise.superset_id.as_deref()),
        String::new(),
    ]
}

pub(crate) fn cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
