//! Rust client for the Hevy workout REST API.
//! Fetches pages of workouts and lays them out on disk as one folder per
//! workout with a text summary and a CSV of every set.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod organizer;
pub mod pipeline;

pub use client::{Client, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use config::Config;
pub use error::{ApiError, HevyError};
pub use export::write_flat_csv;
pub use models::{Exercise, Set, Workout, WorkoutsPage};
pub use organizer::{MalformedPolicy, Organizer, organize};
pub use pipeline::fetch_and_organize;
