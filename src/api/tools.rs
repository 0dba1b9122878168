use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::IdentityResolver;
use crate::stores::ToolStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::tool::{CreateToolApiResponse, CreateToolRequest, ToolResponse};

/// Developer tool catalog API endpoints
pub struct ToolsApi {
    identity_resolver: Arc<IdentityResolver>,
    tool_store: Arc<ToolStore>,
}

impl ToolsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            identity_resolver: app_data.identity_resolver.clone(),
            tool_store: app_data.tool_store.clone(),
        }
    }
}

/// API tags for tool endpoints
#[derive(Tags)]
enum ToolTags {
    /// Tool catalog endpoints
    Tools,
}

#[OpenApi]
impl ToolsApi {
    /// List all tools, newest first
    #[oai(path = "/tools", method = "get", tag = "ToolTags::Tools")]
    async fn list(&self) -> Result<Json<Vec<ToolResponse>>, ApiError> {
        let tools = self.tool_store.list_with_authors().await?;

        Ok(Json(
            tools
                .into_iter()
                .map(|(t, author)| ToolResponse::from_model(t, author.as_ref()))
                .collect(),
        ))
    }

    /// Add a tool to the catalog (admin only)
    #[oai(path = "/tools", method = "post", tag = "ToolTags::Tools")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateToolRequest>,
    ) -> Result<CreateToolApiResponse, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        body.validate().map_err(ApiError::validation)?;

        let tool = self.tool_store.create(&identity.user_id, &body).await?;
        let author = identity;

        Ok(CreateToolApiResponse::Created(Json(ToolResponse {
            author: Some(crate::types::dto::common::AuthorSummary {
                id: author.user_id,
                username: author.username,
                email: author.email,
            }),
            ..ToolResponse::from_model(tool, None)
        })))
    }

    /// Remove a tool from the catalog (admin only)
    #[oai(path = "/tools/:id", method = "delete", tag = "ToolTags::Tools")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let tool = self
            .tool_store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tool"))?;

        self.tool_store.delete(&tool.id).await?;

        Ok(Json(MessageResponse::new("Tool deleted successfully")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{mint_token, setup_test_app, TEST_SECRET};
    use crate::types::dto::tool::ToolCategory;
    use poem_openapi::auth::Bearer;

    fn bearer(token: String) -> BearerAuth {
        BearerAuth(Bearer { token })
    }

    fn create_request(name: &str) -> Json<CreateToolRequest> {
        Json(CreateToolRequest {
            name: name.to_string(),
            description: "A useful tool".to_string(),
            logo: None,
            category: ToolCategory::Development,
            access_link: "https://tool.example.com".to_string(),
            screenshots: None,
            features: Some(vec!["fast".to_string()]),
        })
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create_tool() {
        let app_data = setup_test_app().await;
        let api = ToolsApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "user@x.com", false);
        let result = api.create(bearer(token), create_request("Blocked")).await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
        assert_eq!(app_data.tool_store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_admin_creates_and_lists_tool() {
        let app_data = setup_test_app().await;
        let api = ToolsApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let CreateToolApiResponse::Created(created) = api
            .create(bearer(token), create_request("RustRover"))
            .await
            .unwrap();

        assert_eq!(created.name, "RustRover");
        assert_eq!(created.category, ToolCategory::Development);
        assert_eq!(created.features, vec!["fast"]);
        assert_eq!(created.0.author.as_ref().unwrap().username, "admin");

        let listed = api.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_locally_promoted_user_can_create_tool() {
        let app_data = setup_test_app().await;
        let api = ToolsApi::new(app_data.clone());

        // First request creates the record; token claim stays false
        let token = mint_token(TEST_SECRET, "S1", "user@x.com", false);
        let denied = api
            .create(bearer(token.clone()), create_request("Denied"))
            .await;
        assert!(matches!(denied, Err(ApiError::Forbidden(_))));

        let user = app_data
            .user_store
            .find_by_subject("S1")
            .await
            .unwrap()
            .unwrap();
        app_data.user_store.set_admin(&user.id, true).await.unwrap();

        // Same unrefreshed token now passes the gate via the local flag
        let result = api.create(bearer(token), create_request("Allowed")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_tool_is_not_found() {
        let app_data = setup_test_app().await;
        let api = ToolsApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let result = api
            .delete(bearer(token), Path("missing-id".to_string()))
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_deletes_tool() {
        let app_data = setup_test_app().await;
        let api = ToolsApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let CreateToolApiResponse::Created(created) = api
            .create(bearer(token.clone()), create_request("Temp"))
            .await
            .unwrap();

        api.delete(bearer(token), Path(created.0.id)).await.unwrap();

        assert_eq!(app_data.tool_store.count().await.unwrap(), 0);
    }
}
