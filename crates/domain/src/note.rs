//! 症状日记条目。创建后不可修改、不可删除。

use serde::{Deserialize, Serialize};

use crate::value_objects::{NoteId, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub patient_id: UserId,
    pub intensity: i32,
    pub pain_type: String,
    pub took_prescription: bool,
    pub description: String,
    pub body_part: i32,
    pub created_at: Timestamp,
}

/// 待创建日记条目。patient_id 一律取自认证上下文，而不是请求体。
#[derive(Debug, Clone)]
pub struct NewNote {
    pub patient_id: UserId,
    pub intensity: i32,
    pub pain_type: String,
    pub took_prescription: bool,
    pub description: String,
    pub body_part: i32,
}
