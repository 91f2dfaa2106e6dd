//! 领域模型错误定义

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 参数验证错误
    #[error("invalid argument: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// 指定用户名的医生不存在
    #[error("doctor not found")]
    DoctorNotFound,

    /// 医患关联不存在
    #[error("link not found")]
    LinkNotFound,

    /// 用户不存在
    #[error("user not found")]
    UserNotFound,

    /// 邮箱已被注册
    #[error("email already registered")]
    EmailAlreadyRegistered,

    /// 用户名已被占用
    #[error("username already taken")]
    UsernameAlreadyTaken,
}

impl DomainError {
    /// 创建参数验证错误
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;

/// 存储层错误类型，由各 Repository 实现返回。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
