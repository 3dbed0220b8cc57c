use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chrono::NaiveDate;
use pcl_common::{Paise, Secret};
use pcl_engine::{
    db_types::{PaymentStatus, PayoutSummary, UserId, UserRole},
    events::EventProducers,
    helpers::hmac_sha256_hex,
    traits::{GatewayOrder, IntegrationError},
    PaymentFlowApi,
};
use serde_json::json;

use super::{
    helpers::{error_body, get_request, json, payment, post_request, send_request, timestamp, token_for},
    mocks::{MockPaymentManager, MockPaymentProvider},
};
use crate::{
    config::RazorpayConfig,
    routes::{payment_breakdown, verify_payment, CreateOrderRoute, PaymentStatusRoute, PendingPayoutsRoute},
};

const KEY_SECRET: &str = "rzp_test_key_secret";

fn configure(db: MockPaymentManager, provider: MockPaymentProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let config = RazorpayConfig { key_secret: Secret::new(KEY_SECRET.to_string()), ..Default::default() };
        cfg.service(payment_breakdown)
            .service(verify_payment)
            .service(CreateOrderRoute::<MockPaymentManager, MockPaymentProvider>::new())
            .service(PaymentStatusRoute::<MockPaymentManager>::new())
            .service(PendingPayoutsRoute::<MockPaymentManager>::new())
            .app_data(web::Data::new(PaymentFlowApi::new(db, EventProducers::default())))
            .app_data(web::Data::new(provider))
            .app_data(web::Data::new(config));
    }
}

fn no_backend() -> impl FnOnce(&mut ServiceConfig) {
    configure(MockPaymentManager::new(), MockPaymentProvider::new())
}

#[actix_web::test]
async fn breakdown_withholds_commission() {
    let _ = env_logger::try_init();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "stadium_fee": 3000.0, "referee_fee": 1000.0, "staff_fee": 500.0 });
    let (status, body) = post_request(&token, "/payments/breakdown", body, no_backend()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "stadium": 300_000,
            "stadium_commission": 30_000,
            "stadium_net": 270_000,
            "referee": 100_000,
            "referee_commission": 10_000,
            "referee_net": 90_000,
            "staff": 50_000,
            "staff_commission": 5_000,
            "staff_net": 45_000,
            "total": 450_000,
            "total_commission": 45_000,
            "total_payout": 405_000
        })
    );
}

#[actix_web::test]
async fn verify_payment_signature() {
    let _ = env_logger::try_init();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let signature = hmac_sha256_hex(KEY_SECRET.as_bytes(), b"order_N1x|pay_N1y");
    let body = json!({
        "razorpay_order_id": "order_N1x",
        "razorpay_payment_id": "pay_N1y",
        "razorpay_signature": signature
    });
    let (status, body) = post_request(&token, "/razorpay/verify-payment", body, no_backend()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "verified": true,
            "order_id": "order_N1x",
            "payment_id": "pay_N1y",
            "message": "Payment verified successfully"
        })
    );
}

#[actix_web::test]
async fn verify_payment_with_bad_signature() {
    let _ = env_logger::try_init();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let signature = hmac_sha256_hex(b"some other secret", b"order_N1x|pay_N1y");
    let body = json!({
        "razorpay_order_id": "order_N1x",
        "razorpay_payment_id": "pay_N1y",
        "razorpay_signature": signature
    });
    let (status, body) = post_request(&token, "/razorpay/verify-payment", body, no_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({ "verified": false, "error": "Invalid payment signature" }));
}

#[actix_web::test]
async fn verify_payment_missing_fields() {
    let _ = env_logger::try_init();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "razorpay_order_id": "order_N1x" });
    let (status, body) = post_request(&token, "/razorpay/verify-payment", body, no_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Missing required fields for payment verification"));
}

#[actix_web::test]
async fn create_order_for_match() {
    let _ = env_logger::try_init();
    let mut provider = MockPaymentProvider::new();
    provider
        .expect_create_order()
        .withf(|o| o.amount == 500_000 && o.currency == "INR" && o.receipt == "match_12")
        .times(1)
        .returning(|o| {
            Ok(GatewayOrder {
                id: "order_N1x".into(),
                amount: o.amount,
                currency: o.currency,
                receipt: Some(o.receipt),
                status: "created".into(),
                created_at: 1_714_559_400,
            })
        });
    let mut db = MockPaymentManager::new();
    db.expect_insert_pending_payment()
        .withf(|p| p.razorpay_order_id == "order_N1x" && p.match_id == Some(12) && p.amount == Paise::from(500_000))
        .times(1)
        .returning(|p| Ok(payment(5, &p.razorpay_order_id)));
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "amount": 500_000, "currency": "INR", "receipt": "match_12", "match_id": 12, "club_id": 1 });
    let (status, body) = post_request(&token, "/razorpay/create-order", body, configure(db, provider)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "id": "order_N1x",
            "amount": 500_000,
            "currency": "INR",
            "receipt": "match_12",
            "status": "created",
            "created_at": 1_714_559_400
        })
    );
}

#[actix_web::test]
async fn create_order_requires_amount() {
    let _ = env_logger::try_init();
    let mut provider = MockPaymentProvider::new();
    provider.expect_create_order().never();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "amount": 0, "currency": "INR", "receipt": "match_12" });
    let (status, body) =
        post_request(&token, "/razorpay/create-order", body, configure(MockPaymentManager::new(), provider)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Missing required fields: amount, currency, receipt"));
}

#[actix_web::test]
async fn gateway_rejects_order() {
    let _ = env_logger::try_init();
    let mut provider = MockPaymentProvider::new();
    provider.expect_create_order().times(1).returning(|_| {
        Err(IntegrationError::Rejected { status: 401, message: "Authentication failed".into() })
    });
    let mut db = MockPaymentManager::new();
    db.expect_insert_pending_payment().never();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "amount": 500_000, "currency": "INR", "receipt": "match_12", "match_id": 12 });
    let (status, body) = post_request(&token, "/razorpay/create-order", body, configure(db, provider)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json(&body),
        json!({
            "error": "Failed to create order",
            "message": "Vendor rejected the request (401): Authentication failed"
        })
    );
}

#[actix_web::test]
async fn payment_status_by_order_id() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payment_by_payment_id().times(1).returning(|_| Ok(None));
    db.expect_fetch_payment_by_order_id().withf(|id| id == "order_N1x").times(1).returning(|id| {
        let mut p = payment(5, id);
        p.status = PaymentStatus::Completed;
        p.razorpay_payment_id = Some("pay_N1y".into());
        p.completed_at = Some(timestamp());
        Ok(Some(p))
    });
    let token = token_for("owner-1", UserRole::ClubOwner);
    let path = "/payments/check-status?payment_id=order_N1x";
    let (status, body) = get_request(&token, path, configure(db, MockPaymentProvider::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "id": 5,
            "status": "completed",
            "razorpay_payment_id": "pay_N1y",
            "razorpay_order_id": "order_N1x",
            "completed_at": "2024-05-01T10:30:00Z",
            "amount": 500_000,
            "message": "Payment status: completed"
        })
    );
}

#[actix_web::test]
async fn payment_status_not_found() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payment_by_payment_id().returning(|_| Ok(None));
    db.expect_fetch_payment_by_order_id().returning(|_| Ok(None));
    let token = token_for("owner-1", UserRole::ClubOwner);
    let path = "/payments/check-status?payment_id=pay_unknown";
    let (status, body) = get_request(&token, path, configure(db, MockPaymentProvider::new())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json(&body),
        json!({
            "status": "not_found",
            "message": "Payment record not found - webhook may not have processed yet"
        })
    );
}

#[actix_web::test]
async fn payment_status_needs_an_id() {
    let _ = env_logger::try_init();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let req = TestRequest::get().uri("/payments/check-status");
    let (status, body) = send_request(req, &token, no_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Missing payment_id parameter"));
}

#[actix_web::test]
async fn pending_payouts() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_fetch_payout_summaries().withf(|id| id.as_str() == "ref-3").times(1).returning(|id| {
        Ok(vec![PayoutSummary {
            id: 1,
            user_id: UserId::from(id.as_str()),
            user_role: UserRole::Referee,
            payout_period_start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            payout_period_end: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            total_pending_amount: Paise::from(90_000),
            total_pending_count: 1,
            last_updated: timestamp(),
        }])
    });
    let token = token_for("ref-3", UserRole::Referee);
    let (status, body) = get_request(&token, "/payouts/pending", configure(db, MockPaymentProvider::new())).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body[0]["user_role"], "referee");
    assert_eq!(body[0]["total_pending_amount"], 90_000);
    assert_eq!(body[0]["payout_period_end"], "2024-05-15");
}
