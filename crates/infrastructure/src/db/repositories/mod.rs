mod link_repository_impl;
mod note_repository_impl;
mod notification_repository_impl;
mod user_repository_impl;

pub use link_repository_impl::PgLinkRepository;
pub use note_repository_impl::PgNoteRepository;
pub use notification_repository_impl::PgNotificationRepository;
pub use user_repository_impl::PgUserRepository;
