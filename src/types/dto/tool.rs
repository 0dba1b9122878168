use poem_openapi::{payload::Json, ApiResponse, Enum, Object};

use crate::types::db::{tool, user};
use crate::types::dto::common::AuthorSummary;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Productivity,
    Development,
    Debugging,
    Testing,
    Other,
}

impl ToolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Productivity => "Productivity",
            ToolCategory::Development => "Development",
            ToolCategory::Debugging => "Debugging",
            ToolCategory::Testing => "Testing",
            ToolCategory::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Productivity" => ToolCategory::Productivity,
            "Development" => ToolCategory::Development,
            "Debugging" => ToolCategory::Debugging,
            "Testing" => ToolCategory::Testing,
            _ => ToolCategory::Other,
        }
    }
}

#[derive(Object, Debug)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category: ToolCategory,
    pub access_link: String,
    pub screenshots: Vec<String>,
    pub features: Vec<String>,
    pub author: Option<AuthorSummary>,
    pub created_at: i64,
}

impl ToolResponse {
    pub fn from_model(model: tool::Model, author: Option<&user::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            logo: model.logo,
            category: ToolCategory::parse(&model.category),
            access_link: model.access_link,
            screenshots: serde_json::from_str(&model.screenshots).unwrap_or_default(),
            features: serde_json::from_str(&model.features).unwrap_or_default(),
            author: author.map(AuthorSummary::from),
            created_at: model.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateToolApiResponse {
    #[oai(status = 201)]
    Created(Json<ToolResponse>),
}

#[derive(Object, Debug, Clone)]
pub struct CreateToolRequest {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub category: ToolCategory,
    pub access_link: String,
    pub screenshots: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
}

impl CreateToolRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if self.access_link.trim().is_empty() {
            return Err("access_link must not be empty".to_string());
        }
        Ok(())
    }
}
