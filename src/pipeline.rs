use crate::config::Config;
use crate::error::HevyError;
use log::info;
use std::path::PathBuf;

/// Fetch the configured page of workouts and organize it on disk.
///
/// Runs strictly in sequence: one network call, then one workout at a time.
pub async fn fetch_and_organize(config: &Config) -> Result<PathBuf, HevyError> {
    let client = config.client()?;
    info!(
        "Fetching workouts page {} (page size {})",
        config.page, config.page_size
    );
    let page = client
        .fetch_workouts_page(config.page, config.page_size)
        .await?;
    info!("Organizing {} workouts", page.workouts.len());
    config.organizer().organize(&page.workouts)
}
