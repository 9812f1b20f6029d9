use async_trait::async_trait;
use reqwest::StatusCode;
use ventureos_application::IdentityProvider;
use ventureos_core::{AppError, AppResult, Identity};

use super::records::decode_identity;
use super::{PlatformClient, read_json};

#[async_trait]
impl IdentityProvider for PlatformClient {
    async fn current_identity(&self, access_token: &str) -> AppResult<Identity> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(AppError::Unauthorized("access token is required".to_owned()));
        }

        let response = self
            .http_client
            .get(self.endpoint("auth/me")?)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("platform request for current user failed: {error}"))
            })?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(AppError::Unauthorized(
                "platform rejected the access token".to_owned(),
            ));
        }

        let value = read_json(response, "current user").await?;
        decode_identity(&value)
    }
}
