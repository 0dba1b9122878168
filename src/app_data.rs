use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::providers::{IdentityResolver, TokenVerifier};
use crate::stores::{NewsStore, ProjectStore, ToolStore, UserStore};

/// Centralized application data following the main-owned stores pattern.
///
/// All stores are created once and shared across the API structs. The token
/// verifier is injected so tests can swap the JWT implementation for a
/// double.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub project_store: Arc<ProjectStore>,
    pub tool_store: Arc<ToolStore>,
    pub news_store: Arc<NewsStore>,
    pub identity_resolver: Arc<IdentityResolver>,
}

impl AppData {
    /// Wire up stores and the identity resolver.
    ///
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, verifier: Arc<dyn TokenVerifier>) -> Arc<Self> {
        tracing::debug!("Creating stores...");
        let user_store = Arc::new(UserStore::new(db.clone()));
        let project_store = Arc::new(ProjectStore::new(db.clone()));
        let tool_store = Arc::new(ToolStore::new(db.clone()));
        let news_store = Arc::new(NewsStore::new(db.clone()));

        let identity_resolver = Arc::new(IdentityResolver::new(verifier, user_store.clone()));
        tracing::debug!("AppData initialization complete");

        Arc::new(Self {
            db,
            user_store,
            project_store,
            tool_store,
            news_store,
            identity_resolver,
        })
    }
}
