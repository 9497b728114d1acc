use crate::client::{Client, DEFAULT_PAGE_SIZE};
use crate::error::HevyError;
use crate::organizer::{MalformedPolicy, Organizer};
use std::env;
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "HEVY_API_KEY";
pub const OUTPUT_DIR_ENV: &str = "HEVY_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Everything a run needs, acquired once before any processing starts.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub output_dir: PathBuf,
    pub malformed: MalformedPolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("output_dir", &self.output_dir)
            .field("malformed", &self.malformed)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Result<Self, HevyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(HevyError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            malformed: MalformedPolicy::default(),
        })
    }

    /// Read `HEVY_API_KEY` (required) and `HEVY_OUTPUT_DIR` from the process environment.
    pub fn from_env() -> Result<Self, HevyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HevyError> {
        let api_key = lookup(API_KEY_ENV).ok_or(HevyError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|d| !d.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed = policy;
        self
    }

    pub fn client(&self) -> Result<Client, HevyError> {
        let client = Client::new(self.api_key.clone())?;
        Ok(match &self.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    pub fn organizer(&self) -> Organizer {
        Organizer::new(self.output_dir.clone()).with_malformed_policy(self.malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn requires_api_key() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(HevyError::MissingApiKey)
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(API_KEY_ENV, "")])),
            Err(HevyError::MissingApiKey)
        ));
    }

    #[test]
    fn reads_defaults_and_overrides() {
        let config = Config::from_lookup(lookup(&[(API_KEY_ENV, "key")])).unwrap();
        assert_eq!(config.page, 1);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.malformed, MalformedPolicy::Fail);

        let config = Config::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (OUTPUT_DIR_ENV, "/tmp/workouts"),
        ]))
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/workouts"));
    }

    #[test]
    fn builds_collaborators() {
        let config = Config::new("secret-key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9/v1")
            .with_output_dir("out")
            .with_malformed_policy(MalformedPolicy::Skip);
        assert_eq!(config.client().unwrap().base_url(), "http://127.0.0.1:9/v1");
        assert_eq!(config.organizer().output_dir(), PathBuf::from("out").as_path());
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
