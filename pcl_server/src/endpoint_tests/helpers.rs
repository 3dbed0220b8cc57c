use actix_web::{body::to_bytes, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use log::debug;
use pcl_common::Paise;
use pcl_engine::db_types::{
    Club,
    ClubStatus,
    KycStatus,
    Match,
    MatchFormat,
    MatchPaymentStatus,
    MatchStatus,
    Notification,
    Payment,
    PaymentStatus,
    PushToken,
    Stadium,
    Team,
    User,
    UserId,
    UserRole,
};
use serde_json::Value;

use crate::{
    auth::{TokenIssuer, TokenValidator},
    config::AuthConfig,
    errors::ServerError,
    middleware::JwtMiddlewareFactory,
};

// A test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig::new("endpoint-tests-only-shared-jwt-secret")
}

/// Issues a token for the user. A negative `valid_for` gives an expired token.
pub fn issue_token(user_id: &str, role: UserRole, valid_for: Duration) -> String {
    TokenIssuer::new(&get_auth_config())
        .issue_token(&UserId::from(user_id), None, role, Some(valid_for))
        .expect("Failed to sign token")
}

pub fn token_for(user_id: &str, role: UserRole) -> String {
    issue_token(user_id, role, Duration::hours(1))
}

/// Mounts the routes behind the access token middleware, as the server does, and makes the request. Errors raised by
/// middleware are rendered into their HTTP response.
pub async fn send_request(
    req: TestRequest,
    token: &str,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = req;
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    let validator = TokenValidator::new(&get_auth_config());
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into());
    let app = App::new()
        .app_data(json_config)
        .service(web::scope("").wrap(JwtMiddlewareFactory::new(validator)).configure(configure));
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => res.into_parts().1.map_into_boxed_body(),
        Err(e) => e.error_response(),
    };
    let status = res.status();
    let body = to_bytes(res.into_body()).await.expect("Failed to read response body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn get_request(token: &str, path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    send_request(TestRequest::get().uri(path), token, configure).await
}

pub async fn post_request(
    token: &str,
    path: &str,
    body: Value,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    send_request(TestRequest::post().uri(path).set_json(body), token, configure).await
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).expect("Response was not JSON")
}

pub fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

//--------------------------------------------   Fixtures   -----------------------------------------------------------

pub fn timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
}

pub fn user(id: &str, role: UserRole) -> User {
    User {
        id: UserId::from(id),
        email: Some(format!("{id}@example.com")),
        phone: Some("9876543210".into()),
        first_name: Some("Arjun".into()),
        last_name: Some("Menon".into()),
        full_name: None,
        date_of_birth: Some("1998-04-12".into()),
        role,
        kyc_status: KycStatus::Pending,
        kyc_verified_at: None,
        aadhaar_number: None,
        city: Some("Kochi".into()),
        district: None,
        state: Some("Kerala".into()),
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn club(id: i64, owner: &str) -> Club {
    Club {
        id,
        owner_id: UserId::from(owner),
        club_name: format!("Club {id}"),
        club_type: Some("Unregistered".into()),
        registration_number: None,
        city: Some("Kochi".into()),
        state: Some("Kerala".into()),
        district: None,
        country: Some("India".into()),
        email: None,
        phone: None,
        description: None,
        kyc_verified: false,
        status: ClubStatus::PendingReview,
        document_verification_status: None,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn team(id: i64, club_id: i64) -> Team {
    Team {
        id,
        club_id,
        team_name: format!("Team {id}"),
        formation: None,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn stadium(id: i64, owner: &str) -> Stadium {
    Stadium {
        id,
        owner_id: UserId::from(owner),
        stadium_name: "Jawaharlal Nehru Stadium".into(),
        city: Some("Kochi".into()),
        state: Some("Kerala".into()),
        capacity: Some(5000),
        hourly_rate: Some(Paise::from(250_000)),
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn fixture(id: i64, home_team_id: i64, away_team_id: i64, created_by: &str) -> Match {
    Match {
        id,
        tournament_id: None,
        home_team_id,
        away_team_id,
        match_format: MatchFormat::ElevenASide,
        match_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        match_time: Some("18:00".into()),
        stadium_id: Some(3),
        referee_user_id: None,
        status: MatchStatus::Scheduled,
        payment_status: MatchPaymentStatus::Unpaid,
        payment_id: None,
        created_by: UserId::from(created_by),
        canceled_at: None,
        canceled_by: None,
        cancellation_reason: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn payment(id: i64, order_id: &str) -> Payment {
    Payment {
        id,
        razorpay_order_id: order_id.into(),
        razorpay_payment_id: None,
        match_id: Some(12),
        club_id: Some(1),
        amount: Paise::from(500_000),
        currency: "INR".into(),
        status: PaymentStatus::Pending,
        stadium: Paise::from(300_000),
        stadium_commission: Paise::from(30_000),
        referee: Paise::from(100_000),
        referee_commission: Paise::from(10_000),
        staff: Paise::from(50_000),
        staff_commission: Paise::from(10_000),
        payment_method: None,
        completed_at: None,
        refund_status: None,
        refunded_amount: Paise::default(),
        refunded_at: None,
        notes: None,
        webhook_received: false,
        webhook_data: None,
        webhook_received_at: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn notification(id: i64, user_id: &str) -> Notification {
    Notification {
        id,
        user_id: UserId::from(user_id),
        notification_type: "match_created".into(),
        title: "⚽ New Match Scheduled".into(),
        message: "Club 1 has challenged you to a match".into(),
        contract_id: None,
        match_id: Some(12),
        action_url: Some("/dashboard/club-owner".into()),
        is_read: false,
        read_at: None,
        created_at: timestamp(),
    }
}

pub fn push_token(id: i64, user_id: &str, token: &str) -> PushToken {
    PushToken {
        id,
        user_id: UserId::from(user_id),
        token: token.into(),
        platform: Some("web".into()),
        is_active: true,
        last_used_at: None,
        created_at: timestamp(),
    }
}
