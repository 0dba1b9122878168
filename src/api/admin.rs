use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::IdentityResolver;
use crate::stores::{NewsStore, ProjectStore, ToolStore, UserStore};
use crate::types::dto::admin::AdminStatsResponse;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::user::UserProfileResponse;

/// Admin user-management API endpoints
pub struct AdminApi {
    identity_resolver: Arc<IdentityResolver>,
    user_store: Arc<UserStore>,
    project_store: Arc<ProjectStore>,
    tool_store: Arc<ToolStore>,
    news_store: Arc<NewsStore>,
}

impl AdminApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            identity_resolver: app_data.identity_resolver.clone(),
            user_store: app_data.user_store.clone(),
            project_store: app_data.project_store.clone(),
            tool_store: app_data.tool_store.clone(),
            news_store: app_data.news_store.clone(),
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin user management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List all directory users (admin only)
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    async fn list_users(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<Vec<UserProfileResponse>>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let users = self.user_store.list().await?;

        Ok(Json(users.into_iter().map(Into::into).collect()))
    }

    /// Dashboard totals (admin only)
    #[oai(path = "/stats", method = "get", tag = "AdminTags::Admin")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<AdminStatsResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let (total_users, total_projects, total_tools, total_news) = tokio::try_join!(
            self.user_store.count(),
            self.project_store.count(),
            self.tool_store.count(),
            self.news_store.count(),
        )?;

        Ok(Json(AdminStatsResponse {
            total_users,
            total_projects,
            total_tools,
            total_news,
        }))
    }

    /// Grant the locally stored admin flag (admin only)
    ///
    /// Takes effect on the target's next request; no token refresh needed.
    #[oai(
        path = "/users/:user_id/make-admin",
        method = "put",
        tag = "AdminTags::Admin"
    )]
    async fn make_admin(
        &self,
        auth: BearerAuth,
        user_id: Path<String>,
    ) -> Result<Json<UserProfileResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let updated = self.user_store.set_admin(&user_id, true).await?;

        Ok(Json(updated.into()))
    }

    /// Revoke the locally stored admin flag (admin only)
    ///
    /// A token-claim admin keeps access until their claim changes; only the
    /// local flag is cleared here.
    #[oai(
        path = "/users/:user_id/remove-admin",
        method = "put",
        tag = "AdminTags::Admin"
    )]
    async fn remove_admin(
        &self,
        auth: BearerAuth,
        user_id: Path<String>,
    ) -> Result<Json<UserProfileResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let updated = self.user_store.set_admin(&user_id, false).await?;

        Ok(Json(updated.into()))
    }

    /// Delete a directory user and their authored content (admin only)
    #[oai(path = "/users/:user_id", method = "delete", tag = "AdminTags::Admin")]
    async fn delete_user(
        &self,
        auth: BearerAuth,
        user_id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        self.user_store.delete(&user_id).await?;

        Ok(Json(MessageResponse::new("User deleted successfully")))
    }
}
