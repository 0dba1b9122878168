use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::load_authors;
use crate::types::db::{project, user};
use crate::types::dto::project::{CreateProjectRequest, UpdateProjectRequest};

/// ProjectStore manages the projects collection.
pub struct ProjectStore {
    db: DatabaseConnection,
}

impl ProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All projects, newest first, each with its author (when still present).
    pub async fn list_with_authors(
        &self,
    ) -> Result<Vec<(project::Model, Option<user::Model>)>, InternalError> {
        let projects = project::Entity::find()
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_projects", e))?;

        let mut authors =
            load_authors(&self.db, projects.iter().map(|p| p.author_id.clone())).await?;

        Ok(projects
            .into_iter()
            .map(|p| {
                let author = authors.remove(&p.author_id);
                (p, author)
            })
            .collect())
    }

    pub async fn get_with_author(
        &self,
        id: &str,
    ) -> Result<Option<(project::Model, Option<user::Model>)>, InternalError> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut authors =
            load_authors(&self.db, std::iter::once(project.author_id.clone())).await?;
        let author = authors.remove(&project.author_id);

        Ok(Some((project, author)))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<project::Model>, InternalError> {
        project::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_project", e))
    }

    pub async fn create(
        &self,
        author_id: &str,
        req: &CreateProjectRequest,
    ) -> Result<project::Model, InternalError> {
        let tech_stack = serde_json::to_string(&req.tech_stack)
            .map_err(|e| InternalError::encode("tech_stack", e))?;

        let new_project = project::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(req.title.clone()),
            description: Set(req.description.clone()),
            tech_stack: Set(tech_stack),
            github_link: Set(req.github_link.clone()),
            demo_link: Set(req.demo_link.clone()),
            thumbnail: Set(req.thumbnail.clone()),
            author_id: Set(author_id.to_string()),
            created_at: Set(Utc::now().timestamp()),
        };

        new_project
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("create_project", e))
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(
        &self,
        existing: project::Model,
        req: &UpdateProjectRequest,
    ) -> Result<project::Model, InternalError> {
        let no_changes = req.title.is_none()
            && req.description.is_none()
            && req.tech_stack.is_none()
            && req.github_link.is_none()
            && req.demo_link.is_none()
            && req.thumbnail.is_none();
        if no_changes {
            return Ok(existing);
        }

        let mut active: project::ActiveModel = existing.into();

        if let Some(v) = &req.title {
            active.title = Set(v.clone());
        }
        if let Some(v) = &req.description {
            active.description = Set(v.clone());
        }
        if let Some(v) = &req.tech_stack {
            let encoded = serde_json::to_string(v)
                .map_err(|e| InternalError::encode("tech_stack", e))?;
            active.tech_stack = Set(encoded);
        }
        if let Some(v) = &req.github_link {
            active.github_link = Set(Some(v.clone()));
        }
        if let Some(v) = &req.demo_link {
            active.demo_link = Set(Some(v.clone()));
        }
        if let Some(v) = &req.thumbnail {
            active.thumbnail = Set(Some(v.clone()));
        }

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_project", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        project::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_project", e))?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        project::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_projects", e))
    }
}
