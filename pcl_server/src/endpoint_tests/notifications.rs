use actix_web::{http::StatusCode, web, web::ServiceConfig};
use pcl_engine::{
    db_types::UserRole,
    traits::{IntegrationError, NotificationApiError},
    NotificationApi,
};
use serde_json::json;

use super::{
    helpers::{error_body, get_request, json, notification, post_request, push_token, timestamp, token_for},
    mocks::{MockNotificationManager, MockPushSender},
};
use crate::{
    config::ServerOptions,
    routes::{MarkNotificationReadRoute, NotificationsRoute, RegisterPushTokenRoute, SendPushRoute},
};

fn configure(
    db: MockNotificationManager,
    sender: MockPushSender,
    push_enabled: bool,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(NotificationsRoute::<MockNotificationManager>::new())
            .service(MarkNotificationReadRoute::<MockNotificationManager>::new())
            .service(RegisterPushTokenRoute::<MockNotificationManager>::new())
            .service(SendPushRoute::<MockNotificationManager, MockPushSender>::new())
            .app_data(web::Data::new(NotificationApi::new(db)))
            .app_data(web::Data::new(sender))
            .app_data(web::Data::new(ServerOptions { push_enabled, ..Default::default() }));
    }
}

fn with_db(db: MockNotificationManager) -> impl FnOnce(&mut ServiceConfig) {
    configure(db, MockPushSender::new(), true)
}

#[actix_web::test]
async fn list_notifications() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_notifications()
        .withf(|id| id.as_str() == "owner-2")
        .times(1)
        .returning(|id| Ok(vec![notification(2, id.as_str()), notification(1, id.as_str())]));
    let token = token_for("owner-2", UserRole::ClubOwner);
    let (status, body) = get_request(&token, "/notifications", with_db(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["id"], 2);
    assert_eq!(body[0]["is_read"], false);
}

#[actix_web::test]
async fn mark_read() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_mark_notification_read().withf(|id, user| *id == 2 && user.as_str() == "owner-2").times(1).returning(
        |id, user| {
            let mut n = notification(id, user.as_str());
            n.is_read = true;
            n.read_at = Some(timestamp());
            Ok(Some(n))
        },
    );
    let token = token_for("owner-2", UserRole::ClubOwner);
    let (status, body) = post_request(&token, "/notifications/2/read", json!({}), with_db(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["is_read"], true);
}

#[actix_web::test]
async fn mark_someone_elses_notification_read() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_mark_notification_read().times(1).returning(|_, _| Ok(None));
    let token = token_for("owner-2", UserRole::ClubOwner);
    let (status, body) = post_request(&token, "/notifications/9/read", json!({}), with_db(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("Notification 9 does not exist"));
}

#[actix_web::test]
async fn register_push_token() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_upsert_push_token()
        .withf(|user, token, platform| {
            user.as_str() == "player-1" && token == "fcm-token-1" && *platform == Some("web")
        })
        .times(1)
        .returning(|user, token, _| Ok(push_token(4, user.as_str(), token)));
    let token = token_for("player-1", UserRole::Player);
    let body = json!({ "token": " fcm-token-1 ", "platform": "web" });
    let (status, body) = post_request(&token, "/notifications/tokens", body, with_db(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "success": true, "token_id": 4 }));
}

#[actix_web::test]
async fn register_blank_push_token() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_upsert_push_token().never();
    let token = token_for("player-1", UserRole::Player);
    let (status, body) = post_request(&token, "/notifications/tokens", json!({ "token": "" }), with_db(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Token is required"));
}

#[actix_web::test]
async fn push_fan_out() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_active_push_tokens()
        .withf(|ids| ids.len() == 2)
        .times(1)
        .returning(|_| Ok(vec![push_token(1, "player-1", "good-token"), push_token(2, "player-2", "stale-token")]));
    db.expect_touch_push_token().withf(|id| *id == 1).times(1).returning(|_| Ok(()));
    db.expect_deactivate_push_token().withf(|id| *id == 2).times(1).returning(|_| Ok(()));
    let mut sender = MockPushSender::new();
    sender.expect_send().times(2).returning(|token, message| {
        assert_eq!(message.title, "Kick-off moved");
        match token {
            "good-token" => Ok("projects/pcl/messages/0:1".to_string()),
            _ => Err(IntegrationError::Rejected { status: 404, message: "UNREGISTERED".into() }),
        }
    });
    let token = token_for("owner-2", UserRole::ClubOwner);
    let body = json!({ "user_ids": ["player-1", "player-2"], "title": "Kick-off moved", "body": "Now at 19:00" });
    let (status, body) = post_request(&token, "/notifications/push", body, configure(db, sender, true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "success": true,
            "sent_count": 1,
            "error_count": 1,
            "results": [{ "user_id": "player-1", "token_id": 1, "message_id": "projects/pcl/messages/0:1" }],
            "errors": [{
                "user_id": "player-2",
                "token_id": 2,
                "error": "Vendor rejected the request (404): UNREGISTERED",
                "deactivated": true
            }]
        })
    );
}

#[actix_web::test]
async fn push_fan_out_survives_token_bookkeeping_errors() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_active_push_tokens().times(1).returning(|_| {
        Ok(vec![
            push_token(1, "player-1", "token-1"),
            push_token(2, "player-2", "stale-token"),
            push_token(3, "player-3", "token-3"),
        ])
    });
    db.expect_touch_push_token().times(2).returning(|id| match id {
        1 => Err(NotificationApiError::DatabaseError("database is locked".into())),
        _ => Ok(()),
    });
    db.expect_deactivate_push_token()
        .times(1)
        .returning(|_| Err(NotificationApiError::DatabaseError("database is locked".into())));
    let mut sender = MockPushSender::new();
    sender.expect_send().times(3).returning(|token, _| match token {
        "stale-token" => Err(IntegrationError::Rejected { status: 404, message: "UNREGISTERED".into() }),
        other => Ok(format!("projects/pcl/messages/{other}")),
    });
    let token = token_for("owner-2", UserRole::ClubOwner);
    let body = json!({ "user_ids": ["player-1", "player-2", "player-3"], "title": "Full time", "body": "2 - 1" });
    let (status, body) = post_request(&token, "/notifications/push", body, configure(db, sender, true)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["sent_count"], 2);
    assert_eq!(body["error_count"], 1);
    assert_eq!(body["results"][1]["token_id"], 3);
    assert_eq!(body["errors"][0]["deactivated"], false);
}

#[actix_web::test]
async fn push_without_tokens() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_active_push_tokens().times(1).returning(|_| Ok(vec![]));
    let mut sender = MockPushSender::new();
    sender.expect_send().never();
    let token = token_for("owner-2", UserRole::ClubOwner);
    let body = json!({ "user_id": "player-1", "title": "Hi", "body": "There" });
    let (status, body) = post_request(&token, "/notifications/push", body, configure(db, sender, true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "success": true, "sent_count": 0, "message": "No active tokens found" }));
}

#[actix_web::test]
async fn push_needs_title_and_body() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_active_push_tokens().never();
    let token = token_for("owner-2", UserRole::ClubOwner);
    let body = json!({ "user_id": "player-1", "title": "Hi" });
    let (status, body) = post_request(&token, "/notifications/push", body, with_db(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Missing required fields: title and body"));
}

#[actix_web::test]
async fn push_when_unconfigured() {
    let _ = env_logger::try_init();
    let mut db = MockNotificationManager::new();
    db.expect_fetch_active_push_tokens().never();
    let token = token_for("owner-2", UserRole::ClubOwner);
    let body = json!({ "user_id": "player-1", "title": "Hi", "body": "There" });
    let (status, body) =
        post_request(&token, "/notifications/push", body, configure(db, MockPushSender::new(), false)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        error_body("Invalid server configuration. Push delivery is not available: No FCM service account is configured")
    );
}
