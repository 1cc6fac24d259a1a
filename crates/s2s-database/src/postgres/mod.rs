//! PostgreSQL store.
//!
//! Domain records live in one table per kind as JSONB payloads keyed by
//! UUID. Share infos and origin infos use plain columns so the ledger can be
//! queried directly.

mod ledger;
mod records;
mod writer;

use sqlx::PgPool;

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
