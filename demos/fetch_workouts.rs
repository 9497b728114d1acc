use hevy_organizer::{Config, DEFAULT_PAGE_SIZE};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = Config::from_env()?;
    let client = config.client()?;

    let payload = client.fetch_workouts_page_raw(1, DEFAULT_PAGE_SIZE).await?;

    // Show the shape of the first workout as the API returns it.
    let raw: Value = serde_json::from_str(&payload)?;
    if let Some(first) = raw
        .get("workouts")
        .and_then(Value::as_array)
        .and_then(|w| w.first())
        .and_then(Value::as_object)
    {
        println!("Workout structure:");
        for (key, value) in first {
            println!("{}: {}", key, type_name(value));
        }
    }

    let workouts = hevy_organizer::models::parse_workouts(&payload)?;
    println!("\nFetched {} workouts:", workouts.len());
    for workout in &workouts {
        println!(
            "{} | {} | {} exercises, {} sets",
            workout.start_time.as_deref().unwrap_or("-"),
            workout.title,
            workout.exercises.len(),
            workout.set_count()
        );
    }

    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number (float)",
        Value::Number(_) => "number (integer)",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
