//! `PostgreSQL` adapters for task persistence.

mod conversion;
pub(crate) mod models;
mod schema;
mod store;

#[cfg(test)]
pub(crate) use conversion::{row_to_activity, row_to_task, row_to_user, to_changeset};
pub use store::{PostgresTaskStore, TaskPgPool};

use crate::config::StoreConfig;
use crate::task::ports::{TaskStoreError, TaskStoreResult};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// Builds a connection pool sized by `config`.
///
/// # Errors
///
/// Returns [`TaskStoreError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn build_pool(config: &StoreConfig) -> TaskStoreResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Pool::builder()
        .max_size(config.pool_size())
        .build(manager)
        .map_err(TaskStoreError::persistence)
}
