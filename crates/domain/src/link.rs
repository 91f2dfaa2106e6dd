//! 医患关联（Subscription）及其状态流转。
//!
//! 状态机：pending → accepted | rejected，两个分支均为终态。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{LinkId, Timestamp, UserId};

/// 关联状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Pending,
    Accepted,
    Rejected,
}

impl LinkStatus {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "pending" => Ok(LinkStatus::Pending),
            "accepted" => Ok(LinkStatus::Accepted),
            "rejected" => Ok(LinkStatus::Rejected),
            other => Err(DomainError::invalid_argument(
                "status",
                format!("unknown link status: {}", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Pending => "pending",
            LinkStatus::Accepted => "accepted",
            LinkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 医生对关联请求的响应动作。只接受 "accept" 与 "reject"。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Accept,
    Reject,
}

impl LinkAction {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "accept" => Ok(LinkAction::Accept),
            "reject" => Ok(LinkAction::Reject),
            other => Err(DomainError::invalid_argument(
                "action",
                format!("must be \"accept\" or \"reject\", got: {}", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub doctor_id: UserId,
    pub patient_id: UserId,
    pub status: LinkStatus,
    pub diagnosis: String,
    pub prescription: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Link {
    /// 应用医生的响应。无效动作在 `LinkAction::parse` 阶段即被拒绝，
    /// 因此这里不会修改到一半再失败。
    pub fn respond(&mut self, action: LinkAction) {
        self.status = match action {
            LinkAction::Accept => LinkStatus::Accepted,
            LinkAction::Reject => LinkStatus::Rejected,
        };
    }
}

/// 待创建关联，状态固定为 pending。
#[derive(Debug, Clone)]
pub struct NewLink {
    pub doctor_id: UserId,
    pub patient_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_link() -> Link {
        Link {
            id: LinkId::new(7),
            doctor_id: UserId::new(1),
            patient_id: UserId::new(2),
            status: LinkStatus::Pending,
            diagnosis: String::new(),
            prescription: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn accept_moves_pending_to_accepted() {
        let mut link = pending_link();
        link.respond(LinkAction::parse("accept").unwrap());
        assert_eq!(link.status, LinkStatus::Accepted);
    }

    #[test]
    fn reject_moves_pending_to_rejected() {
        let mut link = pending_link();
        link.respond(LinkAction::parse("reject").unwrap());
        assert_eq!(link.status, LinkStatus::Rejected);
    }

    #[test]
    fn unknown_action_is_rejected_at_parse() {
        let err = LinkAction::parse("frobnicate").unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { .. }));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [LinkStatus::Pending, LinkStatus::Accepted, LinkStatus::Rejected] {
            assert_eq!(LinkStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}
