// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub redaction_enabled: bool,
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LoggerConfig {
    /// Filter directive for the hospital crates at the configured level
    pub fn filter_directive(&self) -> String {
        format!(
            "hospital_server={level},database_layer={level},tower_http=info,sqlx=warn",
            level = self.log_level
        )
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            log_level: "info".to_string(),
            json: false,
        }
    }
}
