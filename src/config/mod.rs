// Configuration layer - environment, secrets, and logging setup
pub mod logging;
pub mod secret_manager;
pub mod settings;

pub use logging::init_logging;
pub use secret_manager::{SecretError, SecretManager};
pub use settings::Settings;
