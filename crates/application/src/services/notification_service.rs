use std::sync::Arc;

use domain::{NewNotification, Notification, NotificationId, UserId};
use tracing::warn;

use crate::{
    error::ApplicationError, push::LivePusher, repository::NotificationRepository,
};

pub struct NotificationServiceDependencies {
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub pusher: Arc<dyn LivePusher>,
}

/// 通知的持久化与尽力实时推送。
pub struct NotificationService {
    deps: NotificationServiceDependencies,
}

impl NotificationService {
    pub fn new(deps: NotificationServiceDependencies) -> Self {
        Self { deps }
    }

    /// 落库后尝试推送给在线用户。推送失败只记日志，
    /// 通知本身已持久化，调用方不关心推送结果。
    pub async fn create(
        &self,
        user_id: UserId,
        message: impl Into<String>,
    ) -> Result<Notification, ApplicationError> {
        let notification = self
            .deps
            .notification_repository
            .create(NewNotification {
                user_id,
                message: message.into(),
            })
            .await?;

        if let Err(err) = self.deps.pusher.push(user_id, &notification).await {
            warn!(%user_id, error = %err, "live push failed, notification persisted");
        }

        Ok(notification)
    }

    pub async fn list(&self, user_id: UserId) -> Result<Vec<Notification>, ApplicationError> {
        Ok(self
            .deps
            .notification_repository
            .list_for_user(user_id)
            .await?)
    }

    /// 属主不匹配时是静默零行更新，不是错误。
    pub async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), ApplicationError> {
        Ok(self
            .deps
            .notification_repository
            .mark_read(id, user_id)
            .await?)
    }

    pub async fn delete(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), ApplicationError> {
        Ok(self.deps.notification_repository.delete(id, user_id).await?)
    }
}
