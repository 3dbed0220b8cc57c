use chrono::Utc;
use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::db_types::{NewNotification, Notification, PushToken, UserId};

pub async fn insert_notification(
    notification: NewNotification,
    conn: &mut SqliteConnection,
) -> Result<Notification, sqlx::Error> {
    let notification: Notification = sqlx::query_as(
        r#"
            INSERT INTO notifications (user_id, notification_type, title, message, contract_id, match_id, action_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(notification.user_id)
    .bind(notification.notification_type)
    .bind(notification.title)
    .bind(notification.message)
    .bind(notification.contract_id)
    .bind(notification.match_id)
    .bind(notification.action_url)
    .fetch_one(conn)
    .await?;
    debug!(
        "🗃️ Notification #{} ({}) stored for {}",
        notification.id, notification.notification_type, notification.user_id
    );
    Ok(notification)
}

pub async fn fetch_notifications(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, sqlx::Error> {
    let notifications =
        sqlx::query_as("SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(user_id)
            .fetch_all(conn)
            .await?;
    Ok(notifications)
}

pub async fn mark_read(
    notification_id: i64,
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Option<Notification>, sqlx::Error> {
    let notification = sqlx::query_as(
        r#"
            UPDATE notifications SET is_read = 1, read_at = COALESCE(read_at, $3)
            WHERE id = $1 AND user_id = $2
            RETURNING *;
        "#,
    )
    .bind(notification_id)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;
    Ok(notification)
}

/// Registers the token for the user. Tokens are unique, so a device that changes hands moves to the new user.
pub async fn upsert_token(
    user_id: &UserId,
    token: &str,
    platform: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<PushToken, sqlx::Error> {
    let token: PushToken = sqlx::query_as(
        r#"
            INSERT INTO notification_tokens (user_id, token, platform, is_active)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (token) DO UPDATE SET
                user_id = excluded.user_id,
                platform = COALESCE(excluded.platform, notification_tokens.platform),
                is_active = 1
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(token)
    .bind(platform)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Push token #{} registered for {user_id}", token.id);
    Ok(token)
}

pub async fn fetch_active_tokens(
    user_ids: &[UserId],
    conn: &mut SqliteConnection,
) -> Result<Vec<PushToken>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT * FROM notification_tokens WHERE is_active = 1 AND user_id IN (");
    let mut ids = builder.separated(", ");
    for id in user_ids {
        ids.push_bind(id.as_str());
    }
    ids.push_unseparated(") ORDER BY id");
    let tokens = builder.build_query_as::<PushToken>().fetch_all(conn).await?;
    Ok(tokens)
}

pub async fn touch_token(token_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notification_tokens SET last_used_at = $2 WHERE id = $1")
        .bind(token_id)
        .bind(Utc::now())
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn deactivate_token(token_id: i64, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notification_tokens SET is_active = 0 WHERE id = $1").bind(token_id).execute(conn).await?;
    debug!("🗃️ Push token #{token_id} deactivated");
    Ok(())
}
