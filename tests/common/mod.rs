use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use techsphere_backend::app_data::AppData;
use techsphere_backend::providers::JwtTokenVerifier;
use techsphere_backend::types::internal::auth::IdTokenClaims;

pub const TEST_SECRET: &str = "integration-test-secret-32-chars-min";

pub async fn setup_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let verifier = Arc::new(JwtTokenVerifier::from_secret(TEST_SECRET));
    AppData::init(db, verifier)
}

pub fn mint_token(subject: &str, email: &str, admin: bool) -> String {
    let now = Utc::now().timestamp();
    let claims = IdTokenClaims {
        sub: subject.to_string(),
        email: email.to_string(),
        admin,
        exp: now + 900,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}
