use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Timestamp, UserId};

/// 用户角色。原系统用裸字符串（"Patient"/"Doctor"）在各处 switch，
/// 这里收敛为封闭枚举，未知取值在边界（注册、token 解析）直接拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "Patient" => Ok(Role::Patient),
            "Doctor" => Ok(Role::Doctor),
            other => Err(DomainError::invalid_argument(
                "role",
                format!("unknown role: {}", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)] // 密码哈希不暴露给客户端
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// 出生日期的展示格式，沿用前端约定的 DD.MM.YYYY。
    pub fn formatted_date_of_birth(&self) -> String {
        self.date_of_birth.format("%d.%m.%Y").to_string()
    }
}

/// 待注册用户。主键与时间戳由存储层生成。
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub sex: String,
    pub date_of_birth: NaiveDate,
    pub role: Role,
}
