// --- File: crates/bookify_config/src/lib.rs ---
pub mod models;

pub use models::{AppConfig, CalcomConfig, ServerConfig};

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;

static DOTENV: OnceCell<()> = OnceCell::new();

/// Loads .env once per process. Later calls are no-ops.
pub fn ensure_dotenv_loaded() {
    DOTENV.get_or_init(|| {
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
///
/// Sources, in order of precedence (later wins):
/// 1. `config/default.toml` (optional),
/// 2. environment variables with the `APP_` prefix and `__` separator,
///    e.g. `APP_SERVER__PORT=8086`, `APP_CALCOM__EVENT_TYPE_ID=1234`.
///
/// Secrets (the Cal.com API key) are read from plain env vars by the crates
/// that need them, not through this config.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
