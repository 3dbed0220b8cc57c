use thiserror::Error;

use crate::db_types::{NewNotification, Notification, PushToken, UserId};

#[derive(Debug, Clone, Error)]
pub enum NotificationApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Notification {0} does not exist")]
    NotificationNotFound(i64),
    #[error("Push delivery is not available: {0}")]
    PushUnavailable(String),
}

impl From<sqlx::Error> for NotificationApiError {
    fn from(e: sqlx::Error) -> Self {
        NotificationApiError::DatabaseError(e.to_string())
    }
}

/// Storage for in-app notifications and the device tokens used to deliver them as push messages.
#[allow(async_fn_in_trait)]
pub trait NotificationManagement {
    async fn insert_notifications(
        &self,
        notifications: Vec<NewNotification>,
    ) -> Result<Vec<Notification>, NotificationApiError>;

    /// The user's notifications, newest first.
    async fn fetch_notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationApiError>;

    /// Marks the notification as read. Returns `None` if it does not exist or belongs to someone else.
    async fn mark_notification_read(
        &self,
        notification_id: i64,
        user_id: &UserId,
    ) -> Result<Option<Notification>, NotificationApiError>;

    /// Registers the device token for the user. A known token is reassigned to the user and reactivated.
    async fn upsert_push_token(
        &self,
        user_id: &UserId,
        token: &str,
        platform: Option<&str>,
    ) -> Result<PushToken, NotificationApiError>;

    async fn fetch_active_push_tokens(&self, user_ids: &[UserId]) -> Result<Vec<PushToken>, NotificationApiError>;

    async fn touch_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;

    async fn deactivate_push_token(&self, token_id: i64) -> Result<(), NotificationApiError>;
}
