//! 用户通知。由系统事件产生，仅属主可标记已读或删除。

use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationId, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub message: String,
}
