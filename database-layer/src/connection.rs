// Database connection management
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{DatabaseError, DatabaseResult};
use crate::models::ALL_TABLES;
use crate::schema::ReferentialPolicy;

/// PostgreSQL connection pool wrapper
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: Arc<PgPool>,
    policy: ReferentialPolicy,
}

impl DatabasePool {
    /// Create a new database pool from connection string
    pub async fn new(
        connection_string: &str,
        max_connections: u32,
        policy: ReferentialPolicy,
    ) -> DatabaseResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(connection_string)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!(max_connections, "Database connection pool created successfully");

        Ok(Self::from_pool(pool, policy))
    }

    /// Wrap an existing pool, e.g. one opened by a test harness
    pub fn from_pool(pool: PgPool, policy: ReferentialPolicy) -> Self {
        Self {
            pool: Arc::new(pool),
            policy,
        }
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn policy(&self) -> ReferentialPolicy {
        self.policy
    }

    /// Create any missing entity tables. Existing tables are left untouched,
    /// including the foreign-key constraints they were created with.
    pub async fn ensure_schema(&self) -> DatabaseResult<()> {
        for schema in ALL_TABLES {
            sqlx::query(&schema.create_table_sql(self.policy))
                .execute(self.pool.as_ref())
                .await
                .map_err(|e| {
                    DatabaseError::SchemaError(format!("Failed to create table {}: {}", schema.table, e))
                })?;
        }
        info!(policy = %self.policy, "Entity tables ready");
        Ok(())
    }

    /// Check if the pool is healthy
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").fetch_one(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
