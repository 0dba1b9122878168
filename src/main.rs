use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, middleware::Cors, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use techsphere_backend::api::{AdminApi, AuthApi, HealthApi, NewsApi, ProjectsApi, ToolsApi};
use techsphere_backend::app_data::AppData;
use techsphere_backend::config::{init_logging, SecretManager, Settings};
use techsphere_backend::providers::JwtTokenVerifier;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = Settings::from_env();

    // Connect to database and run migrations
    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", settings.database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let secret_manager = SecretManager::init().expect("Failed to load secrets");
    let verifier = Arc::new(JwtTokenVerifier::new(&secret_manager));

    let app_data = AppData::init(db, verifier);

    bootstrap_admin(&app_data, &settings).await;

    // Compose the OpenAPI service with Swagger UI
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            ProjectsApi::new(app_data.clone()),
            ToolsApi::new(app_data.clone()),
            NewsApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
        ),
        "TechSphere API",
        "1.0.0",
    )
    .server(format!("http://localhost:{}/api", settings.port));

    let ui = api_service.swagger_ui();

    let mut cors = Cors::new();
    for origin in &settings.allowed_origins {
        cors = cors.allow_origin(origin.as_str());
    }

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(cors);

    let addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", settings.port);

    Server::new(TcpListener::bind(addr)).run(app).await
}

/// Promote the configured bootstrap admin, if that user already registered.
///
/// First-admin bootstrap only; every later promotion goes through the
/// admin routes.
async fn bootstrap_admin(app_data: &Arc<AppData>, settings: &Settings) {
    let Some(email) = &settings.bootstrap_admin_email else {
        return;
    };

    match app_data.user_store.find_by_email(email).await {
        Ok(Some(user)) if !user.is_admin => {
            match app_data.user_store.set_admin(&user.id, true).await {
                Ok(_) => tracing::info!("Bootstrap admin promoted: {}", email),
                Err(e) => tracing::error!("Failed to promote bootstrap admin: {}", e),
            }
        }
        Ok(Some(_)) => tracing::debug!("Bootstrap admin already promoted: {}", email),
        Ok(None) => tracing::warn!(
            "Bootstrap admin {} has no directory record yet; promotion skipped",
            email
        ),
        Err(e) => tracing::error!("Bootstrap admin lookup failed: {}", e),
    }
}
