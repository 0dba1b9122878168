use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::load_authors;
use crate::types::db::{news, user};
use crate::types::dto::news::{CreateNewsRequest, DEFAULT_NEWS_THUMBNAIL};

/// NewsStore manages the news article collection.
pub struct NewsStore {
    db: DatabaseConnection,
}

impl NewsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_with_authors(
        &self,
    ) -> Result<Vec<(news::Model, Option<user::Model>)>, InternalError> {
        let articles = news::Entity::find()
            .order_by_desc(news::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_news", e))?;

        let mut authors =
            load_authors(&self.db, articles.iter().map(|a| a.author_id.clone())).await?;

        Ok(articles
            .into_iter()
            .map(|a| {
                let author = authors.remove(&a.author_id);
                (a, author)
            })
            .collect())
    }

    pub async fn get_with_author(
        &self,
        id: &str,
    ) -> Result<Option<(news::Model, Option<user::Model>)>, InternalError> {
        let Some(article) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut authors =
            load_authors(&self.db, std::iter::once(article.author_id.clone())).await?;
        let author = authors.remove(&article.author_id);

        Ok(Some((article, author)))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<news::Model>, InternalError> {
        news::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_news", e))
    }

    /// Atomic single-row view counter bump.
    pub async fn record_view(&self, id: &str) -> Result<(), InternalError> {
        news::Entity::update_many()
            .col_expr(news::Column::Views, Expr::col(news::Column::Views).add(1))
            .filter(news::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("record_view", e))?;

        Ok(())
    }

    pub async fn create(
        &self,
        author_id: &str,
        req: &CreateNewsRequest,
    ) -> Result<news::Model, InternalError> {
        let thumbnail = req
            .thumbnail
            .clone()
            .unwrap_or_else(|| DEFAULT_NEWS_THUMBNAIL.to_string());

        let new_article = news::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(req.title.clone()),
            description: Set(req.description.clone()),
            content: Set(req.content.clone()),
            thumbnail: Set(thumbnail),
            category: Set(req.category.as_str().to_string()),
            views: Set(0),
            author_id: Set(author_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        new_article
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_news", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        news::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_news", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        news::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_news", e))
    }
}
