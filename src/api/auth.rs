use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::IdentityResolver;
use crate::stores::UserStore;
use crate::types::dto::user::{
    CurrentUserResponse, RegisterApiResponse, UpdateProfileRequest, UserProfileResponse,
};

/// Identity token bearer authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Authentication and profile API endpoints
pub struct AuthApi {
    identity_resolver: Arc<IdentityResolver>,
    user_store: Arc<UserStore>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            identity_resolver: app_data.identity_resolver.clone(),
            user_store: app_data.user_store.clone(),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication and profile endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Return the reconciled identity for the presented token
    #[oai(path = "/user", method = "get", tag = "AuthTags::Authentication")]
    async fn current_user(&self, auth: BearerAuth) -> Result<Json<CurrentUserResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        Ok(Json(CurrentUserResponse::from(&identity)))
    }

    /// Create the directory record for the presented token
    ///
    /// Equivalent to the lazy creation performed on any first authenticated
    /// request; exists so clients can register explicitly after sign-up.
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(&self, auth: BearerAuth) -> Result<RegisterApiResponse, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        let user = self
            .user_store
            .find_by_id(&identity.user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User"))?;

        Ok(RegisterApiResponse::Created(Json(user.into())))
    }

    /// Update the caller's own profile
    #[oai(path = "/profile", method = "put", tag = "AuthTags::Authentication")]
    async fn update_profile(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<UserProfileResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        body.validate().map_err(ApiError::validation)?;

        let updated = self
            .user_store
            .update_profile(&identity.user_id, &body)
            .await?;

        Ok(Json(updated.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{mint_token, setup_test_app, TEST_SECRET};
    use poem_openapi::auth::Bearer;

    fn bearer(token: String) -> BearerAuth {
        BearerAuth(Bearer { token })
    }

    #[tokio::test]
    async fn test_current_user_creates_record_on_first_sight() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "a@x.com", false);
        let response = api.current_user(bearer(token)).await.unwrap();

        assert_eq!(response.subject_id, "S1");
        assert_eq!(response.username, "a");
        assert!(!response.admin);

        let stored = app_data
            .user_store
            .find_by_subject("S1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.email, "a@x.com");
        assert!(!stored.is_admin);
    }

    #[tokio::test]
    async fn test_current_user_rejects_invalid_token() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data);

        let result = api
            .current_user(bearer("invalid-jwt-token".to_string()))
            .await;

        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_register_returns_directory_record() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "alice@x.com", false);
        let RegisterApiResponse::Created(profile) = api.register(bearer(token)).await.unwrap();

        assert_eq!(profile.subject_id, "S1");
        assert_eq!(profile.username, "alice");
        assert_eq!(app_data.user_store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_twice_keeps_single_record() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "alice@x.com", false);
        api.register(bearer(token.clone())).await.unwrap();
        api.register(bearer(token)).await.unwrap();

        assert_eq!(app_data.user_store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_changes_username() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "a@x.com", false);
        api.register(bearer(token.clone())).await.unwrap();

        let body = Json(UpdateProfileRequest {
            username: Some("new-name".to_string()),
            display_name: None,
            bio: Some("rustacean".to_string()),
            college: None,
            linkedin_url: None,
            github_url: None,
        });
        let updated = api.update_profile(bearer(token.clone()), body).await.unwrap();

        assert_eq!(updated.username, "new-name");
        assert_eq!(updated.bio.as_deref(), Some("rustacean"));

        // The reconciled identity picks up the new username on the next call
        let current = api.current_user(bearer(token)).await.unwrap();
        assert_eq!(current.username, "new-name");
    }

    #[tokio::test]
    async fn test_update_profile_rejects_empty_username() {
        let app_data = setup_test_app().await;
        let api = AuthApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "a@x.com", false);

        let body = Json(UpdateProfileRequest {
            username: Some("   ".to_string()),
            display_name: None,
            bio: None,
            college: None,
            linkedin_url: None,
            github_url: None,
        });
        let result = api.update_profile(bearer(token), body).await;

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
