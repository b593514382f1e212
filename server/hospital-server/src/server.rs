use std::sync::Arc;
use std::time::Instant;

use database_layer::{DatabaseResult, Entity, ReferentialPolicy, Repository, Store};
use logger_redacted::PiiRedactor;

/// Default connection string when neither flag nor environment names one
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/hospital_db";

/// Main hospital server state
#[derive(Clone)]
pub struct HospitalServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Entity store shared by every repository
    pub store: Store,
    /// Redactor applied to record values before they are logged
    pub redactor: Arc<PiiRedactor>,
    /// When the server state was built
    pub started_at: Instant,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// PostgreSQL connection string, or `memory`
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Whether appointment and bill references are checked
    pub referential_policy: ReferentialPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Hospital Records Engine".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            referential_policy: ReferentialPolicy::default(),
        }
    }
}

// database_url may carry credentials
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("referential_policy", &self.referential_policy)
            .finish_non_exhaustive()
    }
}

impl HospitalServer {
    /// Connect to the configured store and build the server state
    pub async fn new(config: ServerConfig, redactor: PiiRedactor) -> DatabaseResult<Self> {
        let store = Store::connect(
            &config.database_url,
            config.max_connections,
            config.referential_policy,
        )
        .await?;

        Ok(Self::with_store(config, store, redactor))
    }

    /// Build server state around an already opened store
    pub fn with_store(config: ServerConfig, store: Store, redactor: PiiRedactor) -> Self {
        Self {
            config,
            store,
            redactor: Arc::new(redactor),
            started_at: Instant::now(),
        }
    }

    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.store.clone())
    }

    /// Redact PII from a value headed for the log
    pub fn redact(&self, value: &str) -> String {
        self.redactor.redact(value)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
