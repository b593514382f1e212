use error_common::codes;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A value does not fit the column it is written to
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The targeted row does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Foreign-key or uniqueness violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Database error: {0}")]
    SqlxError(sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Stable error code reported to API clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => codes::database::CONNECTION_FAILED,
            Self::Validation(_) => codes::validation::INVALID_FORMAT,
            Self::NotFound { .. } => codes::resource::NOT_FOUND,
            Self::Constraint(_) => codes::database::CONSTRAINT_VIOLATION,
            _ => codes::database::QUERY_FAILED,
        }
    }
}

/// Classifies store-native failures into the repository taxonomy.
impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    ErrorKind::ForeignKeyViolation | ErrorKind::UniqueViolation => {
                        Self::Constraint(message)
                    }
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        Self::Validation(message)
                    }
                    _ => match db_err.code().as_deref() {
                        // string_data_right_truncation, numeric_value_out_of_range
                        Some("22001") | Some("22003") => Self::Validation(message),
                        _ => Self::QueryFailed(message),
                    },
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionFailed(err.to_string())
            }
            other => Self::SqlxError(other),
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
