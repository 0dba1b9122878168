use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use crate::app_data::AppData;
use crate::providers::JwtTokenVerifier;
use crate::types::internal::auth::IdTokenClaims;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

/// In-memory database, migrated, with the full store/resolver wiring and a
/// JWT verifier keyed to `TEST_SECRET`.
pub async fn setup_test_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let verifier = Arc::new(JwtTokenVerifier::from_secret(TEST_SECRET));
    AppData::init(db, verifier)
}

/// Mint an identity token the way the external provider would.
pub fn mint_token(secret: &str, subject: &str, email: &str, admin: bool) -> String {
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
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to mint test token")
}
