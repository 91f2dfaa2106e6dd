//! 基础设施层。
//!
//! Postgres 存储实现、bcrypt 密码哈希、以及实时通知的连接注册表（Hub）。

pub mod db;
pub mod hub;
pub mod password;

pub use db::{create_pg_pool, DbPool};
pub use db::repositories::{
    PgLinkRepository, PgNoteRepository, PgNotificationRepository, PgUserRepository,
};
pub use hub::NotificationHub;
pub use password::BcryptPasswordHasher;
