//! 疼痛日记系统核心领域模型
//!
//! 包含用户、医患关联、症状记录、通知等核心实体及其业务规则。

pub mod body_part;
pub mod errors;
pub mod link;
pub mod note;
pub mod notification;
pub mod user;
pub mod value_objects;

// 重新导出常用类型
pub use body_part::{BodyPart, BODY_PARTS};
pub use errors::{DomainError, DomainResult, RepositoryError};
pub use link::{Link, LinkAction, LinkStatus, NewLink};
pub use note::{NewNote, Note};
pub use notification::{NewNotification, Notification};
pub use user::{NewUser, Role, User};
pub use value_objects::{LinkId, NoteId, NotificationId, Timestamp, UserId};
