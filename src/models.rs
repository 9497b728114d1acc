use crate::error::HevyError;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const UNNAMED_WORKOUT: &str = "Unnamed Workout";

/// One page of the `/workouts` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkoutsPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub workouts: Vec<Workout>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workout {
    #[serde(default, deserialize_with = "deserialize_identifier_opt")]
    pub id: Option<String>,
    #[serde(
        default = "default_workout_title",
        deserialize_with = "deserialize_workout_title"
    )]
    pub title: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exercise {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub notes: String,
    /// Exercises sharing a superset id are performed back-to-back.
    #[serde(default, deserialize_with = "deserialize_identifier_opt")]
    pub superset_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub sets: Vec<Set>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Set {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub duration_seconds: Option<Decimal>,
}

impl Workout {
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

fn default_workout_title() -> String {
    UNNAMED_WORKOUT.to_string()
}

fn deserialize_workout_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_else(default_workout_title))
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let raw: Option<T> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

fn deserialize_identifier_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(json_value_to_string)
        .filter(|s| !s.is_empty()))
}

fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn parse_workouts_page(data: &str) -> Result<WorkoutsPage, HevyError> {
    let parsed: WorkoutsPage = serde_json::from_str(data).map_err(|e| {
        debug!("Failed to parse workouts page: {}", e);
        HevyError::InvalidResponse
    })?;
    debug!(
        "Parsed page {:?}/{:?} with {} workouts",
        parsed.page,
        parsed.page_count,
        parsed.workouts.len()
    );
    Ok(parsed)
}

pub fn parse_workouts(data: &str) -> Result<Vec<Workout>, HevyError> {
    parse_workouts_page(data).map(|page| page.workouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn sample_payload() -> String {
        let payload = json!({
            "page": 1,
            "page_count": 12,
            "workouts": [
                {
                    "id": "b459cba5-cd6d-463c-abd6-54f8eafcadcb",
                    "title": "Morning Workout 💪",
                    "description": "Felt strong",
                    "start_time": "2024-05-01T10:00:00Z",
                    "end_time": "2024-05-01T10:45:30Z",
                    "updated_at": "2024-05-01T11:00:00Z",
                    "created_at": "2024-05-01T11:00:00Z",
                    "exercises": [
                        {
                            "index": 0,
                            "title": "Bench Press (Barbell)",
                            "notes": "Paused reps",
                            "exercise_template_id": "05293BCA",
                            "superset_id": 3,
                            "sets": [
                                {
                                    "index": 0,
                                    "set_type": "normal",
                                    "weight_kg": 100,
                                    "reps": 10,
                                    "distance_meters": null,
                                    "duration_seconds": null,
                                    "rpe": 9.5
                                },
                                {
                                    "index": 1,
                                    "set_type": "normal",
                                    "weight_kg": 82.5,
                                    "reps": null,
                                    "duration_seconds": 45
                                }
                            ]
                        }
                    ]
                }
            ]
        });
        payload.to_string()
    }

    #[test]
    fn parses_workouts_page() {
        let page = parse_workouts_page(&sample_payload()).expect("page should parse");
        assert_eq!(page.page, Some(1));
        assert_eq!(page.page_count, Some(12));
        assert_eq!(page.workouts.len(), 1);

        let workout = &page.workouts[0];
        assert_eq!(
            workout.id.as_deref(),
            Some("b459cba5-cd6d-463c-abd6-54f8eafcadcb")
        );
        assert_eq!(workout.title, "Morning Workout 💪");
        assert_eq!(workout.description.as_deref(), Some("Felt strong"));
        assert_eq!(workout.set_count(), 2);

        let exercise = &workout.exercises[0];
        assert_eq!(exercise.title, "Bench Press (Barbell)");
        assert_eq!(exercise.superset_id.as_deref(), Some("3"));

        let set = &exercise.sets[1];
        assert_eq!(set.index, Some(1));
        assert_eq!(set.reps, None);
        assert_eq!(set.weight_kg, Some(Decimal::from_str("82.5").unwrap()));
        assert_eq!(set.duration_seconds, Some(Decimal::from(45)));
    }

    #[test]
    fn integral_weights_keep_their_json_form() {
        let page = parse_workouts_page(&sample_payload()).unwrap();
        let set = &page.workouts[0].exercises[0].sets[0];
        assert_eq!(set.weight_kg.map(|w| w.to_string()).as_deref(), Some("100"));
    }

    #[test]
    fn applies_defaults_for_missing_and_null_fields() {
        let payload = json!({
            "workouts": [
                {
                    "id": null,
                    "start_time": "2024-05-02T08:00:00Z",
                    "exercises": [
                        { "title": null, "notes": null, "superset_id": null, "sets": null }
                    ]
                },
                { "title": null, "exercises": null }
            ]
        })
        .to_string();

        let workouts = parse_workouts(&payload).expect("workouts should parse");
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].id, None);
        assert_eq!(workouts[0].title, UNNAMED_WORKOUT);
        assert_eq!(workouts[0].end_time, None);
        let exercise = &workouts[0].exercises[0];
        assert_eq!(exercise.title, "");
        assert_eq!(exercise.notes, "");
        assert_eq!(exercise.superset_id, None);
        assert!(exercise.sets.is_empty());

        assert_eq!(workouts[1].title, UNNAMED_WORKOUT);
        assert_eq!(workouts[1].start_time, None);
        assert!(workouts[1].exercises.is_empty());
    }

    #[test]
    fn only_strings_and_numbers_are_identifiers() {
        let payload = json!({
            "workouts": [
                { "id": true, "exercises": [ { "superset_id": 7, "sets": [ { "index": null } ] } ] },
                { "id": 42, "exercises": [ { "superset_id": false } ] }
            ]
        })
        .to_string();

        let workouts = parse_workouts(&payload).unwrap();
        assert_eq!(workouts[0].id, None);
        assert_eq!(workouts[0].exercises[0].superset_id.as_deref(), Some("7"));
        assert_eq!(workouts[0].exercises[0].sets[0].index, None);
        assert_eq!(workouts[1].id.as_deref(), Some("42"));
        assert_eq!(workouts[1].exercises[0].superset_id, None);
    }

    #[test]
    fn missing_workouts_array_is_an_empty_page() {
        let page = parse_workouts_page("{}").unwrap();
        assert!(page.workouts.is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_workouts_page("not json").unwrap_err();
        assert!(matches!(err, HevyError::InvalidResponse));

        let err = parse_workouts_page(r#"{"workouts": "nope"}"#).unwrap_err();
        assert!(matches!(err, HevyError::InvalidResponse));
    }
}
