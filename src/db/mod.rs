pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::employee::{Employee, EmployeeDraft};

pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Single-row persistence for employees. Consistency is whatever the
/// backing engine provides; concurrent updates are last-writer-wins.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Employee>, StoreError>;

    /// Stores a new record. The store assigns `id` and `created_at`.
    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, StoreError>;

    /// Returns `false` when no row with `employee.id` exists.
    async fn update(&self, employee: &Employee) -> Result<bool, StoreError>;

    /// Returns `false` when no row with `employee.id` exists.
    async fn delete(&self, employee: &Employee) -> Result<bool, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
