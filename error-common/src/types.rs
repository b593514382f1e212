use thiserror::Error;

/// Process-level errors raised while starting or running the server
#[derive(Error, Debug)]
pub enum HospitalError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for process-level operations
pub type Result<T> = std::result::Result<T, HospitalError>;

/// Log an error together with the context it occurred in
pub fn log_error(context: &str, error: &HospitalError) {
    tracing::error!(
        context = context,
        error = %error,
        "Hospital engine error occurred"
    );
}
