//! 通知服务单元测试。

use std::sync::{atomic::Ordering, Arc};

use domain::NotificationId;

use crate::services::{
    test_support::{InMemoryNotificationRepository, InMemoryUserRepository, RecordingPusher},
    NotificationService, NotificationServiceDependencies,
};

fn setup() -> (
    NotificationService,
    Arc<InMemoryNotificationRepository>,
    Arc<RecordingPusher>,
    Arc<InMemoryUserRepository>,
) {
    let repo = Arc::new(InMemoryNotificationRepository::new());
    let pusher = Arc::new(RecordingPusher::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let service = NotificationService::new(NotificationServiceDependencies {
        notification_repository: repo.clone(),
        pusher: pusher.clone(),
    });
    (service, repo, pusher, users)
}

#[tokio::test]
async fn create_persists_unread_and_pushes() {
    let (service, repo, pusher, users) = setup();
    let user = users.seed("alice", domain::Role::Patient);

    let notification = service.create(user.id, "hello").await.unwrap();

    assert!(!notification.is_read);
    assert_eq!(repo.get(notification.id).unwrap().message, "hello");
    assert_eq!(pusher.push_count(), 1);
}

#[tokio::test]
async fn push_failure_is_swallowed_and_record_kept() {
    let (service, repo, pusher, users) = setup();
    let user = users.seed("alice", domain::Role::Patient);
    pusher.fail.store(true, Ordering::SeqCst);

    let notification = service.create(user.id, "hello").await.unwrap();

    // 推送失败不冒泡，记录仍然存在
    assert!(repo.get(notification.id).is_some());
    assert_eq!(pusher.push_count(), 0);
}

#[tokio::test]
async fn list_returns_most_recent_first() {
    let (service, _repo, _pusher, users) = setup();
    let user = users.seed("alice", domain::Role::Patient);

    service.create(user.id, "first").await.unwrap();
    service.create(user.id, "second").await.unwrap();

    let items = service.list(user.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].message, "second");
    assert_eq!(items[1].message, "first");
}

#[tokio::test]
async fn mark_read_for_foreign_notification_is_silent_noop() {
    let (service, repo, _pusher, users) = setup();
    let owner = users.seed("alice", domain::Role::Patient);
    let other = users.seed("mallory", domain::Role::Patient);

    let notification = service.create(owner.id, "private").await.unwrap();

    // 他人操作不报错，也不改标志
    service.mark_read(notification.id, other.id).await.unwrap();
    assert!(!repo.get(notification.id).unwrap().is_read);

    service.mark_read(notification.id, owner.id).await.unwrap();
    assert!(repo.get(notification.id).unwrap().is_read);
}

#[tokio::test]
async fn delete_is_scoped_to_the_owner() {
    let (service, repo, _pusher, users) = setup();
    let owner = users.seed("alice", domain::Role::Patient);
    let other = users.seed("mallory", domain::Role::Patient);

    let notification = service.create(owner.id, "private").await.unwrap();

    service.delete(notification.id, other.id).await.unwrap();
    assert!(repo.get(notification.id).is_some());

    service.delete(notification.id, owner.id).await.unwrap();
    assert!(repo.get(notification.id).is_none());
}

#[tokio::test]
async fn mark_read_on_unknown_id_is_not_an_error() {
    let (service, _repo, _pusher, users) = setup();
    let user = users.seed("alice", domain::Role::Patient);

    service
        .mark_read(NotificationId::new(424242), user.id)
        .await
        .unwrap();
}
