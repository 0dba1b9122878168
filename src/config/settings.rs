use std::env;

/// Server settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    /// Cross-origin hosts allowed by the CORS middleware. Empty means any.
    pub allowed_origins: Vec<String>,
    /// When set, the matching directory record is promoted to admin at
    /// startup. First-admin bootstrap; later promotions go through the API.
    pub bootstrap_admin_email: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://techsphere.db?mode=rwc".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4000);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let bootstrap_admin_email = env::var("BOOTSTRAP_ADMIN_EMAIL").ok();

        Self {
            database_url,
            port,
            allowed_origins,
            bootstrap_admin_email,
        }
    }
}
