use std::fmt::Debug;

use log::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    db_types::{Notification, PushToken, UserId},
    traits::{NotificationApiError, NotificationManagement, PushMessage, PushSender},
};

/// A push message addressed to one or more users. It is delivered to every active device token they hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushRequest {
    pub user_ids: Vec<UserId>,
    pub title: String,
    pub body: String,
    pub data: Map<String, Value>,
    pub click_action: Option<String>,
}

impl PushRequest {
    /// The push message for an in-app notification, linking back to it.
    pub fn for_notification(notification: &Notification) -> Self {
        let mut data = Map::new();
        data.insert("notification_id".into(), Value::String(notification.id.to_string()));
        data.insert("type".into(), Value::String(notification.notification_type.clone()));
        if let Some(id) = notification.match_id {
            data.insert("match_id".into(), Value::String(id.to_string()));
        }
        if let Some(id) = notification.contract_id {
            data.insert("contract_id".into(), Value::String(id.to_string()));
        }
        Self {
            user_ids: vec![notification.user_id.clone()],
            title: notification.title.clone(),
            body: notification.message.clone(),
            data,
            click_action: notification.action_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushDelivery {
    pub user_id: UserId,
    pub token_id: i64,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushFailure {
    pub user_id: UserId,
    pub token_id: i64,
    pub error: String,
    /// The token was rejected as unusable and has been deactivated.
    pub deactivated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushReport {
    pub sent_count: usize,
    pub error_count: usize,
    pub results: Vec<PushDelivery>,
    pub errors: Vec<PushFailure>,
}

/// `NotificationApi` gives users access to their in-app notifications and delivers push messages to their devices.
pub struct NotificationApi<B> {
    db: B,
}

impl<B> Debug for NotificationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi")
    }
}

impl<B> NotificationApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> NotificationApi<B>
where B: NotificationManagement
{
    pub async fn notifications(&self, user_id: &UserId) -> Result<Vec<Notification>, NotificationApiError> {
        self.db.fetch_notifications(user_id).await
    }

    pub async fn mark_read(
        &self,
        user_id: &UserId,
        notification_id: i64,
    ) -> Result<Notification, NotificationApiError> {
        self.db
            .mark_notification_read(notification_id, user_id)
            .await?
            .ok_or(NotificationApiError::NotificationNotFound(notification_id))
    }

    pub async fn register_token(
        &self,
        user_id: &UserId,
        token: Option<&str>,
        platform: Option<&str>,
    ) -> Result<PushToken, NotificationApiError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NotificationApiError::ValidationError("Token is required".into()))?;
        let token = self.db.upsert_push_token(user_id, token, platform).await?;
        debug!("📲️ Push token #{} registered for {user_id}", token.id);
        Ok(token)
    }

    /// Sends the message to every active device of the recipients.
    ///
    /// Delivery failures do not abort the fan-out. Each one is reported, and tokens the push service rejects as
    /// unregistered or invalid are deactivated so they are not tried again. Failing to update a token's record is
    /// logged and the fan-out carries on.
    pub async fn send_push(
        &self,
        sender: &impl PushSender,
        request: PushRequest,
    ) -> Result<PushReport, NotificationApiError> {
        if request.title.trim().is_empty() || request.body.trim().is_empty() {
            return Err(NotificationApiError::ValidationError("Missing required fields: title and body".into()));
        }
        if request.user_ids.is_empty() {
            return Err(NotificationApiError::ValidationError("Missing required field: user_id or user_ids".into()));
        }
        let tokens = self.db.fetch_active_push_tokens(&request.user_ids).await?;
        let mut report = PushReport::default();
        if tokens.is_empty() {
            debug!("📲️ No active push tokens for {} users", request.user_ids.len());
            return Ok(report);
        }
        let message = PushMessage {
            title: request.title,
            body: request.body,
            data: request.data,
            click_action: request.click_action,
        };
        for token in tokens {
            match sender.send(&token.token, &message).await {
                Ok(message_id) => {
                    // The message is already out, so a bookkeeping failure must not end the fan-out
                    if let Err(err) = self.db.touch_push_token(token.id).await {
                        warn!("📲️ Could not record the delivery to push token #{}. {err}", token.id);
                    }
                    report.results.push(PushDelivery { user_id: token.user_id, token_id: token.id, message_id });
                },
                Err(e) => {
                    let mut deactivated = false;
                    if e.is_invalid_push_token() {
                        info!("📲️ Push token #{} is no longer valid. Deactivating it.", token.id);
                        match self.db.deactivate_push_token(token.id).await {
                            Ok(()) => deactivated = true,
                            Err(err) => warn!("📲️ Could not deactivate push token #{}. {err}", token.id),
                        }
                    } else {
                        warn!("📲️ Push to token #{} failed. {e}", token.id);
                    }
                    report.errors.push(PushFailure {
                        user_id: token.user_id,
                        token_id: token.id,
                        error: e.to_string(),
                        deactivated,
                    });
                },
            }
        }
        report.sent_count = report.results.len();
        report.error_count = report.errors.len();
        debug!("📲️ Push fan-out complete. {} sent, {} failed", report.sent_count, report.error_count);
        Ok(report)
    }
}
