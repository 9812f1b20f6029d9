use std::collections::HashMap;

use async_trait::async_trait;
use ventureos_application::IdentityProvider;
use ventureos_core::{AppError, AppResult, Identity};

/// Development identity provider backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    /// Creates an empty provider. Every token is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy that resolves `access_token` to `identity`.
    #[must_use]
    pub fn with_identity(mut self, access_token: impl Into<String>, identity: Identity) -> Self {
        self.identities.insert(access_token.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self, access_token: &str) -> AppResult<Identity> {
        self.identities
            .get(access_token.trim())
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("unknown access token".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use ventureos_application::IdentityProvider;
    use ventureos_core::{AppError, Identity, PlatformRole};

    use super::StaticIdentityProvider;

    #[tokio::test]
    async fn resolves_known_tokens_only() {
        let provider = StaticIdentityProvider::new().with_identity(
            "dev-ana",
            Identity::new("ana@studio.io", None, PlatformRole::User),
        );

        let identity = provider.current_identity("dev-ana").await;
        assert!(identity.is_ok_and(|identity| identity.email() == "ana@studio.io"));

        let missing = provider.current_identity("dev-bo").await;
        assert!(matches!(missing, Err(AppError::Unauthorized(_))));
    }
}
