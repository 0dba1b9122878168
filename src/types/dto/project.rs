use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::{project, user};
use crate::types::dto::common::AuthorSummary;

#[derive(Object, Debug)]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub github_link: Option<String>,
    pub demo_link: Option<String>,
    pub thumbnail: Option<String>,
    pub author: Option<AuthorSummary>,
    pub created_at: i64,
}

impl ProjectResponse {
    pub fn from_model(model: project::Model, author: Option<&user::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            tech_stack: serde_json::from_str(&model.tech_stack).unwrap_or_default(),
            github_link: model.github_link,
            demo_link: model.demo_link,
            thumbnail: model.thumbnail,
            author: author.map(AuthorSummary::from),
            created_at: model.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateProjectApiResponse {
    #[oai(status = 201)]
    Created(Json<ProjectResponse>),
}

#[derive(Object, Debug, Clone)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub github_link: Option<String>,
    pub demo_link: Option<String>,
    pub thumbnail: Option<String>,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        Ok(())
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Object, Debug, Clone)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub github_link: Option<String>,
    pub demo_link: Option<String>,
    pub thumbnail: Option<String>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title must not be empty".to_string());
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err("description must not be empty".to_string());
            }
        }
        Ok(())
    }
}
