// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod health;
pub mod news;
pub mod projects;
pub mod tools;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use health::HealthApi;
pub use news::NewsApi;
pub use projects::ProjectsApi;
pub use tools::ToolsApi;
