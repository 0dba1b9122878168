// Stores layer - Data access and repository pattern
pub mod news_store;
pub mod project_store;
pub mod tool_store;
pub mod user_store;

pub use news_store::NewsStore;
pub use project_store::ProjectStore;
pub use tool_store::ToolStore;
pub use user_store::UserStore;

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::InternalError;
use crate::types::db::user;

/// Fetch the authors referenced by a batch of content rows, keyed by user id.
///
/// One query per batch; rows whose author was deleted simply have no entry.
pub(crate) async fn load_authors(
    db: &DatabaseConnection,
    author_ids: impl IntoIterator<Item = String>,
) -> Result<HashMap<String, user::Model>, InternalError> {
    let mut ids: Vec<String> = author_ids.into_iter().collect();
    ids.sort();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let authors = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| InternalError::database("load_authors", e))?;

    Ok(authors.into_iter().map(|u| (u.id.clone(), u)).collect())
}
