//! Adapter for the hosted entity platform that stores users, roles and
//! role assignments.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;
use ventureos_core::{AppError, AppResult};

mod identity;
mod records;
mod roles;

#[cfg(test)]
mod request_tests;

const API_KEY_HEADER: &str = "api_key";
const ROLE_ENTITY: &str = "Role";
const ROLE_ASSIGNMENT_ENTITY: &str = "RoleAssignment";

/// Connection settings for the hosted entity platform.
#[derive(Debug, Clone)]
pub struct PlatformClientConfig {
    /// Platform API root, for example `https://platform.example.com/api/apps/studio/`.
    pub base_url: Url,
    /// Service key sent with entity requests.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the hosted entity platform.
#[derive(Clone)]
pub struct PlatformClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl PlatformClient {
    /// Creates a client from connection settings.
    pub fn new(config: PlatformClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url: with_trailing_slash(config.base_url),
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|error| {
            AppError::Internal(format!("invalid platform endpoint '{path}': {error}"))
        })
    }

    fn entity_url(&self, entity: &str, record_id: Option<&str>) -> AppResult<Url> {
        let mut url = self.endpoint(format!("entities/{entity}").as_str())?;
        if let Some(record_id) = record_id {
            url.path_segments_mut()
                .map_err(|()| AppError::Internal("platform base URL cannot be a base".to_owned()))?
                .push(record_id);
        }

        Ok(url)
    }

    fn entity_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(API_KEY_HEADER, self.api_key.as_str())
    }

    async fn send_entity_request(&self, request: RequestBuilder, context: &str) -> AppResult<Value> {
        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("platform request for {context} failed: {error}"))
        })?;
        debug!(status = response.status().as_u16(), context, "platform response");

        read_json(response, context).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(path.as_str());
    }

    url
}

async fn read_json(response: Response, context: &str) -> AppResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, context, body.as_str()));
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }

    let body = response.text().await.map_err(|error| {
        AppError::Internal(format!("failed to read platform response for {context}: {error}"))
    })?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body.as_str()).map_err(|error| {
        AppError::Internal(format!("platform returned invalid JSON for {context}: {error}"))
    })
}

fn status_error(status: StatusCode, context: &str, body: &str) -> AppError {
    let message = format!("platform rejected {context} with status {status}: {body}");
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        _ => AppError::Internal(message),
    }
}
