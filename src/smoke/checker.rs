use super::report::{CheckOutcome, SmokeReport};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "http://app:8080";
pub const HEALTH_CHECK_PATH: &str = "/health";
pub const DB_CHECK_PATH: &str = "/api/test-db";

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("Invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Runs the smoke checks against one service
pub struct SmokeChecker {
    client: Client,
    base_url: String,
    retries: u32,
    retry_interval: Duration,
}

impl SmokeChecker {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SmokeError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SmokeError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retries: 0,
            retry_interval: Duration::from_secs(2),
        })
    }

    /// Retries requests that fail to connect or time out, for services
    /// that are still starting
    pub fn with_retries(mut self, retries: u32, interval: Duration) -> Self {
        self.retries = retries;
        self.retry_interval = interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn run(&self) -> SmokeReport {
        info!(base_url = %self.base_url, "Running smoke checks");

        let checks = vec![self.check_health().await, self.check_database().await];
        for check in &checks {
            if check.passed {
                info!(check = %check.name, "{}", check.message);
            } else {
                warn!(check = %check.name, "{}", check.message);
            }
        }

        SmokeReport {
            base_url: self.base_url.clone(),
            checks,
        }
    }

    /// `GET /health` must answer 200
    pub async fn check_health(&self) -> CheckOutcome {
        let url = self.url(HEALTH_CHECK_PATH);
        match self.get(&url).await {
            Ok(response) if response.status() == StatusCode::OK => {
                CheckOutcome::passed("health", &url, "HTTP 200".to_string())
            }
            Ok(response) => CheckOutcome::failed(
                "health",
                &url,
                format!("Expected HTTP 200, got {}", response.status()),
            ),
            Err(e) => CheckOutcome::failed("health", &url, format!("Cannot connect to {}", url))
                .with_details(e.to_string()),
        }
    }

    /// `GET /api/test-db` must answer `{"status": "success"}`
    pub async fn check_database(&self) -> CheckOutcome {
        let url = self.url(DB_CHECK_PATH);
        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                return CheckOutcome::failed("database", &url, format!("Cannot connect to {}", url))
                    .with_details(e.to_string())
            }
        };

        let status_code = response.status();
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return CheckOutcome::failed(
                    "database",
                    &url,
                    format!("Response is not valid JSON (HTTP {})", status_code),
                )
                .with_details(e.to_string())
            }
        };

        match body.get("status").and_then(|s| s.as_str()) {
            Some("success") => {
                CheckOutcome::passed("database", &url, "Database connection succeeded".to_string())
            }
            Some(other) => CheckOutcome::failed(
                "database",
                &url,
                format!("Expected status 'success', got '{}'", other),
            )
            .with_details(body.to_string()),
            None => CheckOutcome::failed(
                "database",
                &url,
                "Response has no string 'status' field".to_string(),
            )
            .with_details(body.to_string()),
        }
    }

    async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        let mut attempt = 0;
        loop {
            debug!(url, attempt, "GET");
            match self.client.get(url).send().await {
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.retries => {
                    attempt += 1;
                    debug!(url, error = %e, "Request failed, retrying in {:?}", self.retry_interval);
                    tokio::time::sleep(self.retry_interval).await;
                }
                result => return result,
            }
        }
    }
}
