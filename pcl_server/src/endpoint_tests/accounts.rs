use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Duration;
use log::debug;
use pcl_engine::{
    db_types::{UserId, UserProfile, UserRole},
    AccountApi,
};
use serde_json::json;

use super::{
    helpers::{error_body, get_request, issue_token, json, post_request, token_for, user},
    mocks::MockAccountManager,
};
use crate::routes::{CurrentUserRoute, DashboardRoute, UpdateProfileRoute};

fn configure(db: MockAccountManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(CurrentUserRoute::<MockAccountManager>::new())
            .service(DashboardRoute::<MockAccountManager>::new())
            .service(UpdateProfileRoute::<MockAccountManager>::new())
            .app_data(web::Data::new(AccountApi::new(db)));
    }
}

#[actix_web::test]
async fn fetch_user_without_token() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/user", configure(MockAccountManager::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error_body("No access token was provided"));
}

#[actix_web::test]
async fn fetch_user_with_expired_token() {
    let _ = env_logger::try_init();
    let token = issue_token("player-1", UserRole::Player, Duration::hours(-2));
    debug!("Calling /user with expired token");
    let (status, body) = get_request(&token, "/user", configure(MockAccountManager::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error_body("Access token has expired"));
}

#[actix_web::test]
async fn fetch_user_with_garbage_token() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("not.a.token", "/user", configure(MockAccountManager::new())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json(&body)["error"].as_str().unwrap().starts_with("Access token is invalid."));
}

#[actix_web::test]
async fn fetch_user_before_sign_up() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_fetch_user().times(1).returning(|_| Ok(None));
    let token = token_for("player-1", UserRole::Player);
    let (status, body) = get_request(&token, "/user", configure(db)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, error_body("Unauthorized"));
}

#[actix_web::test]
async fn fetch_user() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_fetch_user().withf(|id| id.as_str() == "player-1").times(1).returning(|id| {
        let mut u = user(id.as_str(), UserRole::Player);
        u.aadhaar_number = Some("234567890123".into());
        Ok(Some(u))
    });
    let token = token_for("player-1", UserRole::Player);
    let (status, body) = get_request(&token, "/user", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["id"], "player-1");
    assert_eq!(body["role"], "player");
    assert_eq!(body["kyc_status"], "pending");
    assert!(body.get("aadhaar_number").is_none(), "Aadhaar numbers are never sent to clients");
}

#[actix_web::test]
async fn dashboard_uses_stored_role() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_fetch_user().times(1).returning(|id| Ok(Some(user(id.as_str(), UserRole::StadiumOwner))));
    // The token claims a different role than the one the user signed up with
    let token = token_for("owner-7", UserRole::Player);
    let (status, body) = get_request(&token, "/dashboard", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "role": "stadium_owner", "path": "/dashboard/stadium-owner" }));
}

#[actix_web::test]
async fn dashboard_before_sign_up() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_fetch_user().times(1).returning(|_| Ok(None));
    let token = token_for("new-user", UserRole::ClubOwner);
    let (status, body) = get_request(&token, "/dashboard", configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "role": "club_owner", "path": "/onboarding/club-owner" }));
}

#[actix_web::test]
async fn update_profile_takes_role_from_token() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_upsert_user()
        .withf(|u| {
            u.id == UserId::from("ref-3") &&
                u.role == UserRole::Referee &&
                u.profile.first_name.as_deref() == Some("Sunil")
        })
        .times(1)
        .returning(|u| {
            let mut stored = user(u.id.as_str(), u.role);
            stored.first_name = u.profile.first_name.clone();
            Ok(stored)
        });
    let token = token_for("ref-3", UserRole::Referee);
    let profile = UserProfile { first_name: Some("Sunil".into()), ..Default::default() };
    let (status, body) = post_request(&token, "/profile", json!(profile), configure(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["role"], "referee");
    assert_eq!(body["first_name"], "Sunil");
}
