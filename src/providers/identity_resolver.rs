use std::sync::Arc;

use crate::errors::InternalError;
use crate::providers::TokenVerifier;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::auth::VerifiedToken;
use crate::types::internal::identity::Identity;

/// Reconciles a verified token against the local user directory.
///
/// Runs once per authenticated request: verify the bearer token, look up (or
/// lazily create) the directory record for its subject id, and produce the
/// request-scoped [`Identity`]. After `resolve` returns, exactly one user
/// record exists for the subject id.
pub struct IdentityResolver {
    verifier: Arc<dyn TokenVerifier>,
    user_store: Arc<UserStore>,
}

impl IdentityResolver {
    pub fn new(verifier: Arc<dyn TokenVerifier>, user_store: Arc<UserStore>) -> Self {
        Self {
            verifier,
            user_store,
        }
    }

    pub async fn resolve(&self, token: &str) -> Result<Identity, InternalError> {
        let verified = self.verifier.verify(token).await?;
        let user = self.resolve_user(&verified).await?;

        Ok(Identity {
            user_id: user.id,
            subject_id: user.subject_id,
            email: user.email,
            username: user.username,
            local_admin: user.is_admin,
            admin_claim: verified.admin_claim,
        })
    }

    async fn resolve_user(&self, verified: &VerifiedToken) -> Result<user::Model, InternalError> {
        if let Some(existing) = self.user_store.find_by_subject(&verified.subject_id).await? {
            return Ok(existing);
        }

        let username = username_from_email(&verified.email);
        match self.user_store.create(verified, &username).await {
            Ok(created) => {
                tracing::info!("Created directory record for subject {}", verified.subject_id);
                Ok(created)
            }
            // Lost the race with a concurrent first request: the unique index
            // on subject_id guarantees a winner exists, so retry the lookup
            // exactly once and use the winner's record.
            Err(InternalError::DuplicateUser { .. }) => self
                .user_store
                .find_by_subject(&verified.subject_id)
                .await?
                .ok_or_else(|| InternalError::ReconcileConflict(verified.subject_id.clone())),
            Err(e) => Err(e),
        }
    }
}

/// Default username for a first-seen subject: the email's local part.
pub fn username_from_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use crate::providers::token_verifier::StaticVerifier;

    async fn setup(subject: &str, email: &str, admin_claim: bool) -> (IdentityResolver, Arc<UserStore>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db));
        let verifier = StaticVerifier::new(subject, email, admin_claim);
        (
            IdentityResolver::new(verifier, user_store.clone()),
            user_store,
        )
    }

    #[tokio::test]
    async fn test_first_resolve_creates_directory_record() {
        let (resolver, user_store) = setup("S1", "a@x.com", false).await;

        let identity = resolver.resolve("some-token").await.unwrap();

        assert_eq!(identity.subject_id, "S1");
        assert_eq!(identity.username, "a");
        assert!(!identity.local_admin);
        assert!(!identity.merged_admin());

        let stored = user_store.find_by_subject("S1").await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
        assert!(!stored.is_admin);
    }

    #[tokio::test]
    async fn test_second_resolve_reuses_existing_record() {
        let (resolver, user_store) = setup("S1", "a@x.com", false).await;

        let first = resolver.resolve("t1").await.unwrap();
        let second = resolver.resolve("t2").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(user_store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_admin_claim_survives_local_flag_false() {
        let (resolver, _store) = setup("S1", "a@x.com", true).await;

        let identity = resolver.resolve("t").await.unwrap();

        assert!(!identity.local_admin);
        assert!(identity.admin_claim);
        assert!(identity.merged_admin());
    }

    #[tokio::test]
    async fn test_local_promotion_takes_effect_without_token_refresh() {
        // Token still carries admin_claim=false
        let (resolver, user_store) = setup("S1", "a@x.com", false).await;

        let before = resolver.resolve("t").await.unwrap();
        assert!(!before.merged_admin());

        user_store.set_admin(&before.user_id, true).await.unwrap();

        let after = resolver.resolve("t").await.unwrap();
        assert!(!after.admin_claim);
        assert!(after.local_admin);
        assert!(after.merged_admin());
    }

    #[tokio::test]
    async fn test_concurrent_first_resolves_create_exactly_one_record() {
        let (resolver, user_store) = setup("S2", "race@x.com", false).await;
        let resolver = Arc::new(resolver);

        let (a, b) = tokio::join!(resolver.resolve("t1"), resolver.resolve("t2"));

        // Neither request errors visibly to its caller
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(a.unwrap().subject_id, "S2");
        assert_eq!(b.unwrap().subject_id, "S2");
        assert_eq!(user_store.count().await.unwrap(), 1);
    }

    #[test]
    fn test_username_from_email_takes_local_part() {
        assert_eq!(username_from_email("a@x.com"), "a");
        assert_eq!(username_from_email("first.last@example.org"), "first.last");
    }

    #[test]
    fn test_username_from_email_degenerate_inputs() {
        assert_eq!(username_from_email("no-at-sign"), "no-at-sign");
        assert_eq!(username_from_email("@host"), "@host");
    }
}
