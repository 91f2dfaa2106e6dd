//! 应用层实现。
//!
//! 围绕领域模型的用例服务，处理输入校验、存储访问、
//! 以及对外部适配器（密码哈希、实时推送）的抽象。

pub mod dto;
pub mod error;
pub mod password;
pub mod push;
pub mod repository;
pub mod services;

pub use dto::{
    DoctorLinkDto, DoctorSummaryDto, NoteDto, PatientLinkDto, PatientSummaryDto, ProfileDto,
    UserSummaryDto,
};
pub use error::ApplicationError;
pub use password::{PasswordHasher, PasswordHasherError};
pub use push::{LivePusher, PushError};
pub use repository::{
    LinkRepository, NoteRepository, NotificationRepository, UserRepository,
};
pub use services::{
    CreateNoteRequest, DiaryService, DiaryServiceDependencies, NotificationService,
    NotificationServiceDependencies, RegisterUserRequest, UserService, UserServiceDependencies,
};
