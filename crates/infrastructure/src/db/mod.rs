//! 数据库连接与错误映射。

use domain::RepositoryError;
use sqlx::{Pool, Postgres};

pub mod repositories;

pub type DbPool = Pool<Postgres>;

pub async fn create_pg_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// sqlx 错误到存储层错误的统一映射。23505 是 Postgres 的唯一约束冲突。
pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            RepositoryError::Conflict
        }
        _ => {
            tracing::warn!(error = %err, "database operation failed");
            RepositoryError::storage(err.to_string())
        }
    }
}
