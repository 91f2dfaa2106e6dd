//! 症状日记 Repository 的 Postgres 实现。只增不改，按存储顺序读取。

use application::NoteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{NewNote, Note, NoteId, RepositoryError, UserId};
use sqlx::{query_as, FromRow};

use crate::db::{map_sqlx_err, DbPool};

#[derive(Debug, Clone, FromRow)]
struct DbNote {
    id: i64,
    patient_id: i64,
    intensity: i32,
    pain_type: String,
    took_prescription: bool,
    description: String,
    body_part: i32,
    created_at: DateTime<Utc>,
}

impl From<DbNote> for Note {
    fn from(row: DbNote) -> Self {
        Note {
            id: NoteId::new(row.id),
            patient_id: UserId::new(row.patient_id),
            intensity: row.intensity,
            pain_type: row.pain_type,
            took_prescription: row.took_prescription,
            description: row.description,
            body_part: row.body_part,
            created_at: row.created_at,
        }
    }
}

pub struct PgNoteRepository {
    pool: DbPool,
}

impl PgNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let row = query_as::<_, DbNote>(
            r#"
            INSERT INTO notes (patient_id, intensity, pain_type, took_prescription, description, body_part)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, patient_id, intensity, pain_type, took_prescription, description, body_part, created_at
            "#,
        )
        .bind(i64::from(note.patient_id))
        .bind(note.intensity)
        .bind(&note.pain_type)
        .bind(note.took_prescription)
        .bind(&note.description)
        .bind(note.body_part)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(row.into())
    }

    async fn list_for_patient(&self, patient_id: UserId) -> Result<Vec<Note>, RepositoryError> {
        let rows = query_as::<_, DbNote>(
            r#"
            SELECT id, patient_id, intensity, pain_type, took_prescription, description, body_part, created_at
            FROM notes
            WHERE patient_id = $1
            ORDER BY id
            "#,
        )
        .bind(i64::from(patient_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(rows.into_iter().map(Note::from).collect())
    }
}
