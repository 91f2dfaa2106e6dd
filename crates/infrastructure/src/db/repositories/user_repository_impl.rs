//! 用户 Repository 的 Postgres 实现。

use application::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{NewUser, RepositoryError, Role, User, UserId};
use sqlx::{query_as, query_scalar, FromRow};

use crate::db::{map_sqlx_err, DbPool};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     father_name, sex, date_of_birth, role, created_at, updated_at";

/// 数据库用户模型
#[derive(Debug, Clone, FromRow)]
struct DbUser {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    father_name: String,
    sex: String,
    date_of_birth: NaiveDate,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn map_user(row: DbUser) -> Result<User, RepositoryError> {
    let role = Role::parse(&row.role)
        .map_err(|_| RepositoryError::storage(format!("unknown role in users row: {}", row.role)))?;

    Ok(User {
        id: UserId::new(row.id),
        username: row.username,
        email: row.email,
        password_hash: row.password_hash,
        first_name: row.first_name,
        last_name: row.last_name,
        father_name: row.father_name,
        sex: row.sex,
        date_of_birth: row.date_of_birth,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = query_as::<_, DbUser>(&format!(
            r#"
            INSERT INTO users
                (username, email, password_hash, first_name, last_name, father_name, sex, date_of_birth, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.father_name)
        .bind(&user.sex)
        .bind(user.date_of_birth)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        map_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.map(map_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.map(map_user).transpose()
    }

    async fn find_doctor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = query_as::<_, DbUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND role = 'Doctor'"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.map(map_user).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(exists)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let exists: bool =
            query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(exists)
    }
}
