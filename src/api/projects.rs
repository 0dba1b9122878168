use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::providers::IdentityResolver;
use crate::stores::ProjectStore;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::project::{
    CreateProjectApiResponse, CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};

/// Project CRUD API endpoints
pub struct ProjectsApi {
    identity_resolver: Arc<IdentityResolver>,
    project_store: Arc<ProjectStore>,
}

impl ProjectsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            identity_resolver: app_data.identity_resolver.clone(),
            project_store: app_data.project_store.clone(),
        }
    }
}

/// API tags for project endpoints
#[derive(Tags)]
enum ProjectTags {
    /// Community project endpoints
    Projects,
}

#[OpenApi]
impl ProjectsApi {
    /// List all projects, newest first
    #[oai(path = "/projects", method = "get", tag = "ProjectTags::Projects")]
    async fn list(&self) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
        let projects = self.project_store.list_with_authors().await?;

        Ok(Json(
            projects
                .into_iter()
                .map(|(p, author)| ProjectResponse::from_model(p, author.as_ref()))
                .collect(),
        ))
    }

    /// Fetch a single project
    #[oai(path = "/projects/:id", method = "get", tag = "ProjectTags::Projects")]
    async fn get(&self, id: Path<String>) -> Result<Json<ProjectResponse>, ApiError> {
        let (project, author) = self
            .project_store
            .get_with_author(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project"))?;

        Ok(Json(ProjectResponse::from_model(project, author.as_ref())))
    }

    /// Create a project owned by the caller
    #[oai(path = "/projects", method = "post", tag = "ProjectTags::Projects")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateProjectRequest>,
    ) -> Result<CreateProjectApiResponse, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        body.validate().map_err(ApiError::validation)?;

        let project = self.project_store.create(&identity.user_id, &body).await?;
        let (project, author) = self
            .project_store
            .get_with_author(&project.id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project"))?;

        Ok(CreateProjectApiResponse::Created(Json(
            ProjectResponse::from_model(project, author.as_ref()),
        )))
    }

    /// Update a project (author or admin)
    #[oai(path = "/projects/:id", method = "put", tag = "ProjectTags::Projects")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateProjectRequest>,
    ) -> Result<Json<ProjectResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        body.validate().map_err(ApiError::validation)?;

        let project = self
            .project_store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project"))?;

        if !identity.may_modify(&project.author_id) {
            return Err(ApiError::not_owner());
        }

        let updated = self.project_store.update(project, &body).await?;
        let (updated, author) = self
            .project_store
            .get_with_author(&updated.id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project"))?;

        Ok(Json(ProjectResponse::from_model(updated, author.as_ref())))
    }

    /// Delete a project (author or admin)
    #[oai(path = "/projects/:id", method = "delete", tag = "ProjectTags::Projects")]
    async fn delete(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let identity = self.identity_resolver.resolve(&auth.0.token).await?;

        let project = self
            .project_store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project"))?;

        if !identity.may_modify(&project.author_id) {
            return Err(ApiError::not_owner());
        }

        self.project_store.delete(&project.id).await?;

        Ok(Json(MessageResponse::new("Project deleted successfully")))
    }
}
