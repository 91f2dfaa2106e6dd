mod diary_service;
mod notification_service;
mod user_service;

pub use diary_service::{CreateNoteRequest, DiaryService, DiaryServiceDependencies};
pub use notification_service::{NotificationService, NotificationServiceDependencies};
pub use user_service::{RegisterUserRequest, UserService, UserServiceDependencies};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod notification_service_tests;
