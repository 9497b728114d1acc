use crate::error::{ApiError, HevyError};
use crate::models::{WorkoutsPage, parse_workouts_page};
use log::{debug, info};
use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, Response, StatusCode};
use std::fmt;
use std::time::Duration;

const BASE_URL: &str = "https://api.hevyapp.com/v1";
const API_KEY_HEADER: &str = "api-key";

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 10;

#[derive(Clone)]
pub struct Client {
    api_key: String,
    http: HttpClient,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Client {
    /// Create a new client with the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self, HevyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(HevyError::MissingApiKey);
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        info!("Initialized Hevy API client with default base URL");
        Ok(Self {
            api_key,
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Updated Hevy API base URL to {}", self.base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of workouts as the raw JSON body.
    pub async fn fetch_workouts_page_raw(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<String, HevyError> {
        validate_paging(page, page_size)?;
        let path = format!("/workouts?page={}&pageSize={}", page, page_size);
        debug!("Fetching workouts page {} (page size {})", page, page_size);
        self.get_text(path).await
    }

    /// Fetch and parse one page of workouts.
    pub async fn fetch_workouts_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<WorkoutsPage, HevyError> {
        let body = self.fetch_workouts_page_raw(page, page_size).await?;
        parse_workouts_page(&body)
    }

    async fn get_text(&self, path: String) -> Result<String, HevyError> {
        let response = self.get(path).await?;
        response.text().await.map_err(HevyError::from)
    }

    async fn get(&self, path: String) -> Result<Response, HevyError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET request to {}", url);
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await?;
        debug!("Received status {}", response.status());
        handle_status(response.status())?;
        Ok(response)
    }
}

fn validate_paging(page: u32, page_size: u32) -> Result<(), HevyError> {
    if page == 0 {
        return Err(HevyError::InvalidParameter("page must be at least 1"));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(HevyError::InvalidParameter(
            "page_size must be between 1 and 10",
        ));
    }
    Ok(())
}

fn handle_status(status: StatusCode) -> Result<(), HevyError> {
    if status.is_success() {
        return Ok(());
    }
    let api_error = match status {
        StatusCode::BAD_REQUEST => ApiError::InvalidRequest,
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
        _ => ApiError::UnexpectedStatus(status),
    };
    Err(HevyError::Api(api_error))
}
