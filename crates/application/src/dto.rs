//! 对外响应 DTO。
//!
//! 列表接口的哨兵语义：患者/医生没有任何关联时不返回空集合，
//! 而是返回单个 `id = 0, status = "none"` 的占位条目，前端据此渲染空态。

use domain::{Link, Note, Role, Timestamp, User};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DoctorSummaryDto {
    pub id: i64,
    pub username: String,
    pub last_name: String,
    pub first_name: String,
    pub father_name: String,
}

impl From<&User> for DoctorSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.clone(),
            last_name: user.last_name.clone(),
            first_name: user.first_name.clone(),
            father_name: user.father_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientSummaryDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub sex: String,
    /// DD.MM.YYYY
    pub date_of_birth: String,
}

impl From<&User> for PatientSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            father_name: user.father_name.clone(),
            sex: user.sex.clone(),
            date_of_birth: user.formatted_date_of_birth(),
        }
    }
}

/// 患者视角的关联条目。
#[derive(Debug, Clone, Serialize)]
pub struct PatientLinkDto {
    pub id: i64,
    pub status: String,
    pub doctor: DoctorSummaryDto,
    pub prescription: String,
}

impl PatientLinkDto {
    /// 无关联时的占位条目。
    pub fn none() -> Self {
        Self {
            id: 0,
            status: "none".to_string(),
            doctor: DoctorSummaryDto::default(),
            prescription: String::new(),
        }
    }

    pub fn from_link(link: &Link, doctor: &User) -> Self {
        Self {
            id: link.id.into(),
            status: link.status.to_string(),
            doctor: DoctorSummaryDto::from(doctor),
            prescription: link.prescription.clone(),
        }
    }
}

/// 医生视角的关联条目。
#[derive(Debug, Clone, Serialize)]
pub struct DoctorLinkDto {
    pub id: i64,
    pub status: String,
    pub patient: PatientSummaryDto,
    pub prescription: String,
    pub diagnosis: String,
}

impl DoctorLinkDto {
    pub fn none() -> Self {
        Self {
            id: 0,
            status: "none".to_string(),
            patient: PatientSummaryDto::default(),
            prescription: String::new(),
            diagnosis: String::new(),
        }
    }

    pub fn from_link(link: &Link, patient: &User) -> Self {
        Self {
            id: link.id.into(),
            status: link.status.to_string(),
            patient: PatientSummaryDto::from(patient),
            prescription: link.prescription.clone(),
            diagnosis: link.diagnosis.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteDto {
    pub id: i64,
    pub date_recorded: Timestamp,
    pub intensity: i32,
    pub pain_type: String,
    pub took_prescription: bool,
    pub description: String,
    pub body_part: i32,
}

impl From<&Note> for NoteDto {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.into(),
            date_recorded: note.created_at,
            intensity: note.intensity,
            pain_type: note.pain_type.clone(),
            took_prescription: note.took_prescription,
            description: note.description.clone(),
            body_part: note.body_part,
        }
    }
}

/// 注册/登录响应里携带的用户摘要。
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryDto {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserSummaryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub sex: String,
    /// DD.MM.YYYY
    pub date_of_birth: String,
    pub role: Role,
}

impl From<&User> for ProfileDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            father_name: user.father_name.clone(),
            sex: user.sex.clone(),
            date_of_birth: user.formatted_date_of_birth(),
            role: user.role,
        }
    }
}
