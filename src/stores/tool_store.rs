use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::load_authors;
use crate::types::db::{tool, user};
use crate::types::dto::tool::CreateToolRequest;

/// ToolStore manages the tools collection.
pub struct ToolStore {
    db: DatabaseConnection,
}

impl ToolStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_with_authors(
        &self,
    ) -> Result<Vec<(tool::Model, Option<user::Model>)>, InternalError> {
        let tools = tool::Entity::find()
            .order_by_desc(tool::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_tools", e))?;

        let mut authors = load_authors(&self.db, tools.iter().map(|t| t.author_id.clone())).await?;

        Ok(tools
            .into_iter()
            .map(|t| {
                let author = authors.remove(&t.author_id);
                (t, author)
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<tool::Model>, InternalError> {
        tool::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_tool", e))
    }

    pub async fn create(
        &self,
        author_id: &str,
        req: &CreateToolRequest,
    ) -> Result<tool::Model, InternalError> {
        let screenshots = serde_json::to_string(req.screenshots.as_deref().unwrap_or_default())
            .map_err(|e| InternalError::encode("screenshots", e))?;
        let features = serde_json::to_string(req.features.as_deref().unwrap_or_default())
            .map_err(|e| InternalError::encode("features", e))?;

        let new_tool = tool::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(req.name.clone()),
            description: Set(req.description.clone()),
            logo: Set(req.logo.clone()),
            category: Set(req.category.as_str().to_string()),
            access_link: Set(req.access_link.clone()),
            screenshots: Set(screenshots),
            features: Set(features),
            author_id: Set(author_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        new_tool
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_tool", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        tool::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_tool", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        tool::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_tools", e))
    }
}
