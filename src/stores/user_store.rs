use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};
use crate::types::dto::user::UpdateProfileRequest;
use crate::types::internal::auth::VerifiedToken;

/// UserStore manages the user directory collection.
///
/// The directory is keyed internally by a UUID; `subject_id` carries the
/// unique index that makes lazy creation safe under concurrency.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_subject(
        &self,
        subject_id: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_subject", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_id", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_email", e))
    }

    /// Insert a directory record for a first-seen subject.
    ///
    /// A unique-constraint violation maps to `DuplicateUser`, which the
    /// identity resolver turns into a single re-lookup.
    pub async fn create(
        &self,
        token: &VerifiedToken,
        username: &str,
    ) -> Result<user::Model, InternalError> {
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            subject_id: Set(token.subject_id.clone()),
            email: Set(token.email.clone()),
            username: Set(username.to_string()),
            display_name: Set(None),
            bio: Set(None),
            college: Set(None),
            linkedin_url: Set(None),
            github_url: Set(None),
            is_admin: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                InternalError::DuplicateUser {
                    field: "subject_id",
                }
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Set the locally stored admin flag. Independent of any token claim;
    /// takes effect on the target user's next request.
    pub async fn set_admin(&self, id: &str, is_admin: bool) -> Result<user::Model, InternalError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| InternalError::UserNotFound(id.to_string()))?;

        if user.is_admin == is_admin {
            return Ok(user);
        }

        let mut active: user::ActiveModel = user.into();
        active.is_admin = Set(is_admin);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_admin", e))
    }

    /// Apply an owner-initiated profile update. Absent fields are left
    /// unchanged; a no-op update leaves the stored record untouched, so
    /// repeating the same input yields the identical record.
    pub async fn update_profile(
        &self,
        id: &str,
        changes: &UpdateProfileRequest,
    ) -> Result<user::Model, InternalError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| InternalError::UserNotFound(id.to_string()))?;

        let unchanged = changes
            .username
            .as_ref()
            .is_none_or(|v| *v == user.username)
            && changes
                .display_name
                .as_ref()
                .is_none_or(|v| Some(v) == user.display_name.as_ref())
            && changes.bio.as_ref().is_none_or(|v| Some(v) == user.bio.as_ref())
            && changes
                .college
                .as_ref()
                .is_none_or(|v| Some(v) == user.college.as_ref())
            && changes
                .linkedin_url
                .as_ref()
                .is_none_or(|v| Some(v) == user.linkedin_url.as_ref())
            && changes
                .github_url
                .as_ref()
                .is_none_or(|v| Some(v) == user.github_url.as_ref());

        if unchanged {
            return Ok(user);
        }

        let mut active: user::ActiveModel = user.into();
        if let Some(v) = &changes.username {
            active.username = Set(v.clone());
        }
        if let Some(v) = &changes.display_name {
            active.display_name = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.bio {
            active.bio = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.college {
            active.college = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.linkedin_url {
            active.linkedin_url = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.github_url {
            active.github_url = Set(Some(v.clone()));
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_profile", e))
    }

    /// Delete a directory record. Authored content goes with it via the
    /// cascade foreign keys.
    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        let result = User::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::UserNotFound(id.to_string()));
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, InternalError> {
        User::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))
    }
}
