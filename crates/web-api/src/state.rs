use std::sync::Arc;

use application::{DiaryService, NotificationService, UserService};
use infrastructure::NotificationHub;

use crate::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub diary_service: Arc<DiaryService>,
    pub notification_service: Arc<NotificationService>,
    pub hub: Arc<NotificationHub>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        diary_service: Arc<DiaryService>,
        notification_service: Arc<NotificationService>,
        hub: Arc<NotificationHub>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_service,
            diary_service,
            notification_service,
            hub,
            jwt_service,
        }
    }
}
