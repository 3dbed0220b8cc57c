use actix_web::{http::StatusCode, web, web::ServiceConfig};
use pcl_engine::{
    db_types::{ClubStatus, DocumentVerificationStatus, UserId, UserRole},
    AccountApi,
    LeagueApi,
};
use serde_json::json;

use super::{
    helpers::{club, error_body, get_request, json, post_request, token_for, user},
    mocks::{MockAccountManager, MockLeagueManager},
};
use crate::routes::{ClubsForReviewRoute, ReviewClubRoute, SetUserStatusRoute};

fn configure_clubs(db: MockLeagueManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(ClubsForReviewRoute::<MockLeagueManager>::new())
            .service(ReviewClubRoute::<MockLeagueManager>::new())
            .app_data(web::Data::new(LeagueApi::new(db)));
    }
}

fn configure_users(db: MockAccountManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(SetUserStatusRoute::<MockAccountManager>::new()).app_data(web::Data::new(AccountApi::new(db)));
    }
}

#[actix_web::test]
async fn list_clubs_awaiting_review() {
    let _ = env_logger::try_init();
    let mut db = MockLeagueManager::new();
    db.expect_fetch_clubs_for_review().times(1).returning(|| {
        let mut documents = club(5, "owner-5");
        documents.document_verification_status = Some(DocumentVerificationStatus::PendingReview);
        Ok(vec![club(4, "owner-4"), documents])
    });
    let token = token_for("admin", UserRole::Admin);
    let (status, body) = get_request(&token, "/admin/clubs/pending", configure_clubs(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["document_verification_status"], "pending_review");
}

#[actix_web::test]
async fn approve_club() {
    let _ = env_logger::try_init();
    let mut db = MockLeagueManager::new();
    db.expect_review_club().withf(|id, approved| *id == 4 && *approved).times(1).returning(|id, _| {
        let mut approved = club(id, "owner-4");
        approved.kyc_verified = true;
        approved.status = ClubStatus::Active;
        approved.document_verification_status = Some(DocumentVerificationStatus::DocumentsVerified);
        Ok(approved)
    });
    let token = token_for("admin", UserRole::Admin);
    let (status, body) =
        post_request(&token, "/admin/clubs/4/review", json!({ "approved": true }), configure_clubs(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "active");
    assert_eq!(body["document_verification_status"], "documents_verified");
    assert_eq!(body["kyc_verified"], true);
}

#[actix_web::test]
async fn only_admins_review_clubs() {
    let _ = env_logger::try_init();
    let mut db = MockLeagueManager::new();
    db.expect_review_club().never();
    db.expect_fetch_clubs_for_review().never();
    let token = token_for("owner-4", UserRole::ClubOwner);
    let (status, body) =
        post_request(&token, "/admin/clubs/4/review", json!({ "approved": true }), configure_clubs(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error_body("Insufficient permissions"));
    let (status, _) = get_request(&token, "/admin/clubs/pending", configure_clubs(MockLeagueManager::new())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn review_missing_club() {
    let _ = env_logger::try_init();
    let mut db = MockLeagueManager::new();
    db.expect_review_club().times(1).returning(|id, _| Err(pcl_engine::traits::LeagueApiError::ClubNotFound(id)));
    let token = token_for("admin", UserRole::Admin);
    let (status, body) =
        post_request(&token, "/admin/clubs/77/review", json!({ "approved": false }), configure_clubs(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("Club 77 does not exist"));
}

#[actix_web::test]
async fn deactivate_user() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_set_user_active().withf(|id, active| id.as_str() == "player-9" && !*active).times(1).returning(
        |id, active| {
            let mut stored = user(id.as_str(), UserRole::Player);
            stored.is_active = active;
            Ok(stored)
        },
    );
    let token = token_for("admin", UserRole::Admin);
    let (status, body) =
        post_request(&token, "/admin/users/player-9/status", json!({ "isActive": false }), configure_users(db)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["id"], "player-9");
    assert_eq!(body["is_active"], false);
}

#[actix_web::test]
async fn user_status_for_unknown_user() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_set_user_active()
        .times(1)
        .returning(|id, _| Err(pcl_engine::traits::AccountApiError::UserNotFound(UserId::from(id.as_str()))));
    let token = token_for("admin", UserRole::Admin);
    let (status, body) =
        post_request(&token, "/admin/users/ghost/status", json!({ "is_active": true }), configure_users(db)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("User ghost does not exist"));
}

#[actix_web::test]
async fn players_cannot_change_user_status() {
    let _ = env_logger::try_init();
    let mut db = MockAccountManager::new();
    db.expect_set_user_active().never();
    let token = token_for("player-1", UserRole::Player);
    let (status, body) =
        post_request(&token, "/admin/users/player-9/status", json!({ "isActive": false }), configure_users(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error_body("Insufficient permissions"));
}
