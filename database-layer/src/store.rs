use tracing::info;

use crate::connection::DatabasePool;
use crate::error::DatabaseResult;
use crate::memory::MemoryStore;
use crate::schema::ReferentialPolicy;

/// Handle to the backend that owns all persisted entity rows.
///
/// Cheap to clone; every clone refers to the same underlying store.
#[derive(Debug, Clone)]
pub enum Store {
    Postgres(DatabasePool),
    Memory(MemoryStore),
}

impl Store {
    /// Open the store named by `database_url`.
    ///
    /// `memory` (or any `memory://` URL) selects the in-process store; anything
    /// else is treated as a PostgreSQL connection string, and missing tables
    /// are created on connect.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        policy: ReferentialPolicy,
    ) -> DatabaseResult<Self> {
        if is_memory_url(database_url) {
            info!(policy = %policy, "Using in-memory entity store");
            return Ok(Self::Memory(MemoryStore::new(policy)));
        }

        let pool = DatabasePool::new(database_url, max_connections, policy).await?;
        pool.ensure_schema().await?;
        Ok(Self::Postgres(pool))
    }

    pub fn memory(policy: ReferentialPolicy) -> Self {
        Self::Memory(MemoryStore::new(policy))
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub fn policy(&self) -> ReferentialPolicy {
        match self {
            Self::Postgres(pool) => pool.policy(),
            Self::Memory(store) => store.policy(),
        }
    }

    pub async fn is_healthy(&self) -> bool {
        match self {
            Self::Postgres(pool) => pool.is_healthy().await,
            Self::Memory(_) => true,
        }
    }

    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            pool.close().await;
        }
    }
}

fn is_memory_url(database_url: &str) -> bool {
    let url = database_url.trim();
    url.eq_ignore_ascii_case("memory") || url.starts_with("memory://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_memory_urls() {
        assert!(is_memory_url("memory"));
        assert!(is_memory_url("MEMORY"));
        assert!(is_memory_url("memory://hospital"));
        assert!(!is_memory_url("postgresql://localhost/hospital_db"));
    }

    #[tokio::test]
    async fn memory_store_connects_without_a_server() {
        let store = Store::connect("memory", 1, ReferentialPolicy::Enforce).await.unwrap();
        assert_eq!(store.backend(), "memory");
        assert_eq!(store.policy(), ReferentialPolicy::Enforce);
        assert!(store.is_healthy().await);
    }
}
