//! 医患关联 Repository 的 Postgres 实现。
//!
//! 列表查询联表取对端用户，patient 视角只取 accepted，
//! doctor 视角取全部状态，均按创建时间倒序。

use application::LinkRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{Link, LinkId, LinkStatus, NewLink, RepositoryError, Role, User, UserId};
use sqlx::{query_as, FromRow};

use crate::db::{map_sqlx_err, DbPool};

const LINK_COLUMNS: &str =
    "id, doctor_id, patient_id, status, diagnosis, prescription, created_at, updated_at";

/// 数据库关联模型
#[derive(Debug, Clone, FromRow)]
struct DbLink {
    id: i64,
    doctor_id: i64,
    patient_id: i64,
    status: String,
    diagnosis: String,
    prescription: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 关联 + 对端用户的联表行。
#[derive(Debug, Clone, FromRow)]
struct DbLinkWithUser {
    id: i64,
    doctor_id: i64,
    patient_id: i64,
    status: String,
    diagnosis: String,
    prescription: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: i64,
    user_username: String,
    user_email: String,
    user_password_hash: String,
    user_first_name: String,
    user_last_name: String,
    user_father_name: String,
    user_sex: String,
    user_date_of_birth: NaiveDate,
    user_role: String,
    user_created_at: DateTime<Utc>,
    user_updated_at: DateTime<Utc>,
}

fn map_link(row: DbLink) -> Result<Link, RepositoryError> {
    let status = LinkStatus::parse(&row.status).map_err(|_| {
        RepositoryError::storage(format!("unknown status in links row: {}", row.status))
    })?;

    Ok(Link {
        id: LinkId::new(row.id),
        doctor_id: UserId::new(row.doctor_id),
        patient_id: UserId::new(row.patient_id),
        status,
        diagnosis: row.diagnosis,
        prescription: row.prescription,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn map_link_with_user(row: DbLinkWithUser) -> Result<(Link, User), RepositoryError> {
    let link = map_link(DbLink {
        id: row.id,
        doctor_id: row.doctor_id,
        patient_id: row.patient_id,
        status: row.status,
        diagnosis: row.diagnosis,
        prescription: row.prescription,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })?;

    let role = Role::parse(&row.user_role).map_err(|_| {
        RepositoryError::storage(format!("unknown role in users row: {}", row.user_role))
    })?;

    let user = User {
        id: UserId::new(row.user_id),
        username: row.user_username,
        email: row.user_email,
        password_hash: row.user_password_hash,
        first_name: row.user_first_name,
        last_name: row.user_last_name,
        father_name: row.user_father_name,
        sex: row.user_sex,
        date_of_birth: row.user_date_of_birth,
        role,
        created_at: row.user_created_at,
        updated_at: row.user_updated_at,
    };

    Ok((link, user))
}

/// 联表查询的用户列别名。
fn user_columns(alias: &str) -> String {
    format!(
        "{a}.id AS user_id, {a}.username AS user_username, {a}.email AS user_email, \
         {a}.password_hash AS user_password_hash, {a}.first_name AS user_first_name, \
         {a}.last_name AS user_last_name, {a}.father_name AS user_father_name, \
         {a}.sex AS user_sex, {a}.date_of_birth AS user_date_of_birth, \
         {a}.role AS user_role, {a}.created_at AS user_created_at, \
         {a}.updated_at AS user_updated_at",
        a = alias
    )
}

pub struct PgLinkRepository {
    pool: DbPool,
}

impl PgLinkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, link: NewLink) -> Result<Link, RepositoryError> {
        let row = query_as::<_, DbLink>(&format!(
            r#"
            INSERT INTO links (doctor_id, patient_id, status)
            VALUES ($1, $2, 'pending')
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(i64::from(link.doctor_id))
        .bind(i64::from(link.patient_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        map_link(row)
    }

    async fn update(&self, link: Link) -> Result<Link, RepositoryError> {
        let row = query_as::<_, DbLink>(&format!(
            r#"
            UPDATE links
            SET status = $2, diagnosis = $3, prescription = $4, updated_at = now()
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(i64::from(link.id))
        .bind(link.status.as_str())
        .bind(&link.diagnosis)
        .bind(&link.prescription)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        map_link(row)
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, RepositoryError> {
        let row = query_as::<_, DbLink>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.map(map_link).transpose()
    }

    async fn find_by_doctor_and_patient(
        &self,
        doctor_id: UserId,
        patient_id: UserId,
    ) -> Result<Option<Link>, RepositoryError> {
        // 重复请求会产生多行，取最新一条
        let row = query_as::<_, DbLink>(&format!(
            r#"
            SELECT {LINK_COLUMNS} FROM links
            WHERE doctor_id = $1 AND patient_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(i64::from(doctor_id))
        .bind(i64::from(patient_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.map(map_link).transpose()
    }

    async fn list_accepted_for_patient(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError> {
        let rows = query_as::<_, DbLinkWithUser>(&format!(
            r#"
            SELECT l.id, l.doctor_id, l.patient_id, l.status, l.diagnosis, l.prescription,
                   l.created_at, l.updated_at, {user_cols}
            FROM links l
            JOIN users u ON u.id = l.doctor_id
            WHERE l.patient_id = $1 AND l.status = 'accepted'
            ORDER BY l.created_at DESC, l.id DESC
            "#,
            user_cols = user_columns("u")
        ))
        .bind(i64::from(patient_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.into_iter().map(map_link_with_user).collect()
    }

    async fn list_for_doctor(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError> {
        let rows = query_as::<_, DbLinkWithUser>(&format!(
            r#"
            SELECT l.id, l.doctor_id, l.patient_id, l.status, l.diagnosis, l.prescription,
                   l.created_at, l.updated_at, {user_cols}
            FROM links l
            JOIN users u ON u.id = l.patient_id
            WHERE l.doctor_id = $1
            ORDER BY l.created_at DESC, l.id DESC
            "#,
            user_cols = user_columns("u")
        ))
        .bind(i64::from(doctor_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.into_iter().map(map_link_with_user).collect()
    }
}
