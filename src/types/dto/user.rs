use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::types::db::user;
use crate::types::internal::identity::Identity;

/// The reconciled request identity, as returned by `GET /auth/user`
#[derive(Object, Debug)]
pub struct CurrentUserResponse {
    pub subject_id: String,
    pub email: String,
    pub username: String,

    /// Merged admin flag: token claim OR locally stored flag
    pub admin: bool,
}

impl From<&Identity> for CurrentUserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            subject_id: identity.subject_id.clone(),
            email: identity.email.clone(),
            username: identity.username.clone(),
            admin: identity.merged_admin(),
        }
    }
}

/// A user directory record
#[derive(Object, Debug)]
pub struct UserProfileResponse {
    pub id: String,
    pub subject_id: String,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub college: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<user::Model> for UserProfileResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            subject_id: u.subject_id,
            email: u.email,
            username: u.username,
            display_name: u.display_name,
            bio: u.bio,
            college: u.college,
            linkedin_url: u.linkedin_url,
            github_url: u.github_url,
            is_admin: u.is_admin,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Directory record created (or already present for this subject)
    #[oai(status = 201)]
    Created(Json<UserProfileResponse>),
}

/// Owner-only profile update. Absent fields are left unchanged.
#[derive(Object, Debug, Clone)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub college: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err("username must not be empty".to_string());
            }
        }
        Ok(())
    }
}
