use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::IdentityResolver;
use crate::stores::NewsStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::news::{CreateNewsApiResponse, CreateNewsRequest, NewsResponse};

/// News article API endpoints
pub struct NewsApi {
    identity_resolver: Arc<IdentityResolver>,
    news_store: Arc<NewsStore>,
}

impl NewsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            identity_resolver: app_data.identity_resolver.clone(),
            news_store: app_data.news_store.clone(),
        }
    }
}

/// API tags for news endpoints
#[derive(Tags)]
enum NewsTags {
    /// News article endpoints
    News,
}

#[OpenApi]
impl NewsApi {
    /// List all news articles, newest first
    #[oai(path = "/news", method = "get", tag = "NewsTags::News")]
    async fn list(&self) -> Result<Json<Vec<NewsResponse>>, ApiError> {
        let articles = self.news_store.list_with_authors().await?;

        Ok(Json(
            articles
                .into_iter()
                .map(|(a, author)| NewsResponse::from_model(a, author.as_ref()))
                .collect(),
        ))
    }

    /// Fetch a single article and count the view
    #[oai(path = "/news/:id", method = "get", tag = "NewsTags::News")]
    async fn get(&self, id: Path<String>) -> Result<Json<NewsResponse>, ApiError> {
        self.news_store.record_view(&id).await?;

        let (article, author) = self
            .news_store
            .get_with_author(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("News article"))?;

        Ok(Json(NewsResponse::from_model(article, author.as_ref())))
    }

    /// Publish a news article (admin only)
    #[oai(path = "/news", method = "post", tag = "NewsTags::News")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateNewsRequest>,
    ) -> Result<CreateNewsApiResponse, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        body.validate().map_err(ApiError::validation)?;

        let article = self.news_store.create(&identity.user_id, &body).await?;
        let (article, author) = self
            .news_store
            .get_with_author(&article.id)
            .await?
            .ok_or_else(|| ApiError::not_found("News article"))?;

        Ok(CreateNewsApiResponse::Created(Json(
            NewsResponse::from_model(article, author.as_ref()),
        )))
    }

    /// Remove a news article (admin only)
    #[oai(path = "/news/:id", method = "delete", tag = "NewsTags::News")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;
        identity.require_admin()?;

        let article = self
            .news_store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("News article"))?;

        self.news_store.delete(&article.id).await?;

        Ok(Json(MessageResponse::new("News deleted successfully")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{mint_token, setup_test_app, TEST_SECRET};
    use crate::types::dto::news::{NewsCategory, DEFAULT_NEWS_THUMBNAIL};
    use poem_openapi::auth::Bearer;

    fn bearer(token: String) -> BearerAuth {
        BearerAuth(Bearer { token })
    }

    fn create_request(title: &str) -> Json<CreateNewsRequest> {
        Json(CreateNewsRequest {
            title: title.to_string(),
            description: "Short summary".to_string(),
            content: "Full article body".to_string(),
            thumbnail: None,
            category: NewsCategory::Ai,
        })
    }

    #[tokio::test]
    async fn test_admin_publishes_article_with_default_thumbnail() {
        let app_data = setup_test_app().await;
        let api = NewsApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let CreateNewsApiResponse::Created(created) = api
            .create(bearer(token), create_request("Big News"))
            .await
            .unwrap();

        assert_eq!(created.title, "Big News");
        assert_eq!(created.thumbnail, DEFAULT_NEWS_THUMBNAIL);
        assert_eq!(created.category, NewsCategory::Ai);
        assert_eq!(created.views, 0);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_publish() {
        let app_data = setup_test_app().await;
        let api = NewsApi::new(app_data.clone());

        let token = mint_token(TEST_SECRET, "S1", "user@x.com", false);
        let result = api.create(bearer(token), create_request("Nope")).await;

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
        assert_eq!(app_data.news_store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_counts_views() {
        let app_data = setup_test_app().await;
        let api = NewsApi::new(app_data);

        let token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let CreateNewsApiResponse::Created(created) = api
            .create(bearer(token), create_request("Read me"))
            .await
            .unwrap();

        let first = api.get(Path(created.id.clone())).await.unwrap();
        assert_eq!(first.views, 1);

        let second = api.get(Path(created.0.id)).await.unwrap();
        assert_eq!(second.views, 2);
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let app_data = setup_test_app().await;
        let api = NewsApi::new(app_data);

        let admin_token = mint_token(TEST_SECRET, "S1", "admin@x.com", true);
        let CreateNewsApiResponse::Created(created) = api
            .create(bearer(admin_token.clone()), create_request("Target"))
            .await
            .unwrap();

        let user_token = mint_token(TEST_SECRET, "S2", "user@x.com", false);
        let denied = api
            .delete(bearer(user_token), Path(created.id.clone()))
            .await;
        assert!(matches!(denied, Err(ApiError::Forbidden(_))));

        api.delete(bearer(admin_token), Path(created.0.id))
            .await
            .unwrap();
    }
}
