// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Cal.com Config ---
// Holds non-secret Cal.com config. The API key is loaded directly from the
// CALCOM_API_KEY env var and never written to a config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalcomConfig {
    /// Base URL of the Cal.com v2 API, e.g. "https://api.cal.com/v2".
    pub api_url: String,
    /// Event type the widget books against.
    pub event_type_id: i64,
    /// Meeting length in minutes; used to derive the end instant of a slot.
    #[serde(default = "default_event_length")]
    pub event_length_minutes: i64,
}

fn default_event_length() -> i64 {
    30
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_calcom: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub calcom: Option<CalcomConfig>,
}
