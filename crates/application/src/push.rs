//! 实时推送抽象。
//!
//! 通知服务通过该 seam 将新通知尽力推给在线用户，
//! 具体的连接注册表（Hub）由基础设施层实现。

use async_trait::async_trait;
use domain::{Notification, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushError {
    /// 目标用户的推送通道已失效
    #[error("push channel closed for user {user_id}")]
    ChannelClosed { user_id: UserId },
    #[error("serialize error: {0}")]
    Serialize(String),
}

#[async_trait]
pub trait LivePusher: Send + Sync {
    /// 向在线用户推送一条通知。用户不在线不是错误；
    /// 通道写失败返回错误，由调用方决定是否忽略。
    async fn push(&self, user_id: UserId, notification: &Notification) -> Result<(), PushError>;
}
