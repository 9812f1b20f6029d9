use async_trait::async_trait;
use ventureos_core::{AppResult, Identity};

/// Port resolving the authenticated user behind an access token.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity for `access_token`.
    ///
    /// Fails with `AppError::Unauthorized` when the token is missing, expired
    /// or unknown.
    async fn current_identity(&self, access_token: &str) -> AppResult<Identity>;
}
