//! 服务测试用的内存版存储与推送实现。

use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    Link, LinkId, LinkStatus, NewLink, NewNote, NewNotification, NewUser, Note, NoteId,
    Notification, NotificationId, RepositoryError, Role, User, UserId,
};

use crate::{
    password::{PasswordHasher, PasswordHasherError},
    push::{LivePusher, PushError},
    repository::{LinkRepository, NoteRepository, NotificationRepository, UserRepository},
};

pub fn test_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 15).unwrap()
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 直接种入一个用户，绕过注册流程。
    pub fn seed(&self, username: &str, role: Role) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now();
        let user = User {
            id: UserId::new(id),
            username: username.to_owned(),
            email: format!("{}@example.com", username),
            password_hash: "seeded".to_owned(),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            father_name: "Father".to_owned(),
            sex: "male".to_owned(),
            date_of_birth: test_date_of_birth(),
            role,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now();
        let stored = User {
            id: UserId::new(id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            father_name: user.father_name,
            sex: user.sex,
            date_of_birth: user.date_of_birth,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_doctor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.role == Role::Doctor)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username))
    }
}

pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryLinkRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            users,
        }
    }

    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn get(&self, id: LinkId) -> Option<Link> {
        self.links.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    fn user(&self, id: UserId) -> User {
        self.users
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .expect("link references unknown user")
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, link: NewLink) -> Result<Link, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now();
        let stored = Link {
            id: LinkId::new(id),
            doctor_id: link.doctor_id,
            patient_id: link.patient_id,
            status: LinkStatus::Pending,
            diagnosis: String::new(),
            prescription: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.links.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, link: Link) -> Result<Link, RepositoryError> {
        let mut links = self.links.lock().unwrap();
        let slot = links
            .iter_mut()
            .find(|l| l.id == link.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = Link {
            updated_at: chrono::Utc::now(),
            ..link.clone()
        };
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Option<Link>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn find_by_doctor_and_patient(
        &self,
        doctor_id: UserId,
        patient_id: UserId,
    ) -> Result<Option<Link>, RepositoryError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .rev() // 最新的一条优先
            .find(|l| l.doctor_id == doctor_id && l.patient_id == patient_id)
            .cloned())
    }

    async fn list_accepted_for_patient(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .iter()
            .rev()
            .filter(|l| l.patient_id == patient_id && l.status == LinkStatus::Accepted)
            .map(|l| (l.clone(), self.user(l.doctor_id)))
            .collect())
    }

    async fn list_for_doctor(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<(Link, User)>, RepositoryError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .iter()
            .rev()
            .filter(|l| l.doctor_id == doctor_id)
            .map(|l| (l.clone(), self.user(l.patient_id)))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicI64,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Note {
            id: NoteId::new(id),
            patient_id: note.patient_id,
            intensity: note.intensity,
            pain_type: note.pain_type,
            took_prescription: note.took_prescription,
            description: note.description,
            body_part: note.body_part,
            created_at: chrono::Utc::now(),
        };
        self.notes.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_for_patient(&self, patient_id: UserId) -> Result<Vec<Note>, RepositoryError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.patient_id == patient_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicI64,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Notification {
            id: NotificationId::new(id),
            user_id: notification.user_id,
            message: notification.message,
            is_read: false,
            created_at: chrono::Utc::now(),
        };
        self.notifications.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        let mut items: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        items.reverse(); // 最近的在前
        Ok(items)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        let mut notifications = self.notifications.lock().unwrap();
        if let Some(n) = notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            n.is_read = true;
        }
        Ok(())
    }

    async fn delete(&self, id: NotificationId, user_id: UserId) -> Result<(), RepositoryError> {
        self.notifications
            .lock()
            .unwrap()
            .retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(())
    }
}

/// 记录每次推送的 LivePusher，可切换为失败模式。
#[derive(Default)]
pub struct RecordingPusher {
    pub pushed: Mutex<Vec<(UserId, Notification)>>,
    pub fail: AtomicBool,
}

impl RecordingPusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_count(&self) -> usize {
        self.pushed.lock().unwrap().len()
    }
}

#[async_trait]
impl LivePusher for RecordingPusher {
    async fn push(
        &self,
        user_id: UserId,
        notification: &Notification,
    ) -> Result<(), PushError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PushError::ChannelClosed { user_id });
        }
        self.pushed
            .lock()
            .unwrap()
            .push((user_id, notification.clone()));
        Ok(())
    }
}

/// 确定性的假哈希，足以验证注册/登录路径。
pub struct FakePasswordHasher;

#[async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordHasherError> {
        Ok(format!("hashed:{}", plaintext))
    }

    async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, PasswordHasherError> {
        Ok(hashed == format!("hashed:{}", plaintext))
    }
}
