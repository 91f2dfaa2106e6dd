use async_trait::async_trait;
use domain::{
    Link, LinkId, NewLink, NewNote, NewNotification, NewUser, Note, Notification, NotificationId,
    RepositoryError, User, UserId,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    /// 按用户名查找医生账号；同名患者不命中。
    async fn find_doctor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn create(&self, link: NewLink) -> Result<Link, RepositoryError>;
    async fn update(&self, link: Link) -> Result<Link, RepositoryError>;
    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, RepositoryError>;
    /// 按 (doctor, patient) 对查找。存在多条 pending 时取最新一条。
    async fn find_by_doctor_and_patient(
        &self,
        doctor_id: UserId,
        patient_id: UserId,
    ) -> Result<Option<Link>, RepositoryError>;
    /// 患者视角：仅 accepted 的关联，按创建时间倒序，附医生信息。
    async fn list_accepted_for_patient(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError>;
    /// 医生视角：全部状态的关联，按创建时间倒序，附患者信息。
    async fn list_for_doctor(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError>;
    async fn list_for_patient(&self, patient_id: UserId) -> Result<Vec<Note>, RepositoryError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError>;
    /// 按创建时间倒序返回该用户的全部通知。
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError>;
    /// 仅当通知属于该用户时置已读；不属于时静默零行更新。
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), RepositoryError>;
    /// 与 mark_read 同样的属主语义。
    async fn delete(&self, id: NotificationId, user_id: UserId) -> Result<(), RepositoryError>;
}
