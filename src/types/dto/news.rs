use poem_openapi::{payload::Json, ApiResponse, Enum, Object};

use crate::types::db::{news, user};
use crate::types::dto::common::AuthorSummary;

pub const DEFAULT_NEWS_THUMBNAIL: &str =
    "https://via.placeholder.com/300x200?text=News+Article";

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsCategory {
    #[oai(rename = "AI")]
    Ai,
    #[oai(rename = "Web Dev")]
    WebDev,
    Cybersecurity,
    Mobile,
    Cloud,
    Other,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Ai => "AI",
            NewsCategory::WebDev => "Web Dev",
            NewsCategory::Cybersecurity => "Cybersecurity",
            NewsCategory::Mobile => "Mobile",
            NewsCategory::Cloud => "Cloud",
            NewsCategory::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "AI" => NewsCategory::Ai,
            "Web Dev" => NewsCategory::WebDev,
            "Cybersecurity" => NewsCategory::Cybersecurity,
            "Mobile" => NewsCategory::Mobile,
            "Cloud" => NewsCategory::Cloud,
            _ => NewsCategory::Other,
        }
    }
}

#[derive(Object, Debug)]
pub struct NewsResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub thumbnail: String,
    pub category: NewsCategory,
    pub views: i64,
    pub author: Option<AuthorSummary>,
    pub created_at: i64,
}

impl NewsResponse {
    pub fn from_model(model: news::Model, author: Option<&user::Model>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            content: model.content,
            thumbnail: model.thumbnail,
            category: NewsCategory::parse(&model.category),
            views: model.views,
            author: author.map(AuthorSummary::from),
            created_at: model.created_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum CreateNewsApiResponse {
    #[oai(status = 201)]
    Created(Json<NewsResponse>),
}

#[derive(Object, Debug, Clone)]
pub struct CreateNewsRequest {
    pub title: String,
    pub description: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub category: NewsCategory,
}

impl CreateNewsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("content must not be empty".to_string());
        }
        Ok(())
    }
}
