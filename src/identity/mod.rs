use crate::error::BoxError;
use crate::models::UserId;
use async_trait::async_trait;
use log::debug;

/// Maps a voter id to something readable. Backed by the bot's user cache in
/// production; lookups are allowed to fail.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn display_name(&self, user: UserId) -> Result<String, BoxError>;
}

/// Resolve a display name, degrading to the raw id when the lookup fails.
/// A miss is not an error condition for an export.
pub async fn display_name_or_id(resolver: &dyn IdentityResolver, user: UserId) -> String {
    match resolver.display_name(user).await {
        Ok(name) => name,
        Err(e) => {
            debug!("Could not resolve user {}: {}", user, e);
            user.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSuchUser;

    #[async_trait]
    impl IdentityResolver for NoSuchUser {
        async fn display_name(&self, _user: UserId) -> Result<String, BoxError> {
            Err("unknown user".into())
        }
    }

    struct AlwaysAlice;

    #[async_trait]
    impl IdentityResolver for AlwaysAlice {
        async fn display_name(&self, _user: UserId) -> Result<String, BoxError> {
            Ok("Alice".to_string())
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_falls_back_to_raw_id() {
        let name = display_name_or_id(&NoSuchUser, UserId(1234)).await;
        assert_eq!(name, "1234");
    }

    #[tokio::test]
    async fn test_resolution_success_uses_display_name() {
        let name = display_name_or_id(&AlwaysAlice, UserId(1234)).await;
        assert_eq!(name, "Alice");
    }
}
