//! 实时通知的连接注册表（Hub）。
//!
//! 每个在线用户对应一条推送通道（WebSocket 连接的发送端）。
//! 读写锁保证：向不同用户并发推送互不阻塞，注册/注销互斥。

use std::collections::HashMap;

use application::{LivePusher, PushError};
use async_trait::async_trait;
use domain::{Notification, UserId};
use tokio::sync::{mpsc, RwLock};

/// 推送通道的载荷是已序列化的通知 JSON，
/// 套接字写入由各连接自己的转发任务完成。
pub type PushSender = mpsc::UnboundedSender<String>;

#[derive(Default)]
pub struct NotificationHub {
    clients: RwLock<HashMap<UserId, PushSender>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册用户的推送通道。重连时旧通道的发送端被丢弃，
    /// 其转发任务随之结束并关闭旧连接（close-on-replace）。
    pub async fn register(&self, user_id: UserId, sender: PushSender) {
        self.clients.write().await.insert(user_id, sender);
    }

    /// 注销连接。只有当 map 里仍是这条连接的发送端才移除，
    /// 被替换下来的旧连接退出时不能误删新连接。
    pub async fn unregister(&self, user_id: UserId, sender: &PushSender) {
        let mut clients = self.clients.write().await;
        if let Some(current) = clients.get(&user_id) {
            if current.same_channel(sender) {
                clients.remove(&user_id);
            }
        }
    }

    pub async fn is_connected(&self, user_id: UserId) -> bool {
        self.clients.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl LivePusher for NotificationHub {
    async fn push(&self, user_id: UserId, notification: &Notification) -> Result<(), PushError> {
        let payload = serde_json::to_string(notification)
            .map_err(|err| PushError::Serialize(err.to_string()))?;

        let clients = self.clients.read().await;
        match clients.get(&user_id) {
            Some(sender) => {
                sender
                    .send(payload)
                    .map_err(|_| PushError::ChannelClosed { user_id })?;
            }
            // 用户不在线不算错误
            None => tracing::debug!(%user_id, "no live connection, skipping push"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::NotificationId;

    fn notification(user_id: UserId) -> Notification {
        Notification {
            id: NotificationId::new(1),
            user_id,
            message: "hello".to_owned(),
            is_read: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn push_reaches_registered_channel() {
        let hub = NotificationHub::new();
        let user = UserId::new(1);
        let (tx, mut rx) = mpsc::unbounded_channel();

        hub.register(user, tx).await;
        hub.push(user, &notification(user)).await.unwrap();

        let payload = rx.recv().await.unwrap();
        assert!(payload.contains("\"message\":\"hello\""));
    }

    #[tokio::test]
    async fn push_to_offline_user_is_ok() {
        let hub = NotificationHub::new();
        let user = UserId::new(1);

        hub.push(user, &notification(user)).await.unwrap();
    }

    #[tokio::test]
    async fn reregistering_replaces_and_closes_the_old_channel() {
        let hub = NotificationHub::new();
        let user = UserId::new(1);
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        hub.register(user, tx1).await;
        hub.register(user, tx2).await;

        hub.push(user, &notification(user)).await.unwrap();

        // 只有第二条通道收到推送；第一条的发送端已被丢弃，通道随之关闭
        assert!(rx2.recv().await.is_some());
        assert!(rx1.recv().await.is_none());
    }

    #[tokio::test]
    async fn push_to_dropped_receiver_reports_closed_channel() {
        let hub = NotificationHub::new();
        let user = UserId::new(1);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        hub.register(user, tx).await;
        let result = hub.push(user, &notification(user)).await;

        assert!(matches!(result, Err(PushError::ChannelClosed { .. })));
        // 坏通道不会被自动注销
        assert!(hub.is_connected(user).await);
    }

    #[tokio::test]
    async fn stale_connection_cannot_unregister_its_replacement() {
        let hub = NotificationHub::new();
        let user = UserId::new(1);
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        hub.register(user, tx1.clone()).await;
        hub.register(user, tx2.clone()).await;

        // 旧连接清理自己时，新连接仍然在线
        hub.unregister(user, &tx1).await;
        assert!(hub.is_connected(user).await);

        hub.unregister(user, &tx2).await;
        assert!(!hub.is_connected(user).await);
    }
}
