use actix_web::{http::StatusCode, test, web, App};
use pcl_common::{Paise, Secret};
use pcl_engine::{
    db_types::PaymentStatus,
    events::EventProducers,
    helpers::hmac_sha256_hex,
    traits::{CaptureResult, PaymentGatewayError},
    PaymentFlowApi,
};
use serde_json::{json, Value};

use super::{helpers::payment, mocks::MockPaymentManager};
use crate::{
    middleware::{HmacMiddlewareFactory, RAZORPAY_SIGNATURE_HEADER},
    routes::RazorpayWebhookRoute,
};

const WEBHOOK_SECRET: &str = "whsec_test_only";

fn captured_payload() -> Value {
    json!({
        "entity": "event",
        "event": "payment.captured",
        "payload": {
            "payment": {
                "entity": {
                    "id": "pay_N1y",
                    "order_id": "order_N1x",
                    "amount": 500_000,
                    "currency": "INR",
                    "method": "upi",
                    "status": "captured"
                }
            }
        }
    })
}

/// Posts the payload to the webhook endpoint, signed with `secret` unless it is `None`.
async fn post_webhook(
    db: MockPaymentManager,
    payload: &Value,
    secret: Option<&str>,
    hmac_checks: bool,
) -> (StatusCode, Value) {
    post_webhook_to_server(db, WEBHOOK_SECRET, payload, secret, hmac_checks).await
}

/// As `post_webhook`, for a server configured with `server_secret` as its webhook secret.
async fn post_webhook_to_server(
    db: MockPaymentManager,
    server_secret: &str,
    payload: &Value,
    secret: Option<&str>,
    hmac_checks: bool,
) -> (StatusCode, Value) {
    let scope = web::scope("/api/webhooks")
        .wrap(HmacMiddlewareFactory::new(
            RAZORPAY_SIGNATURE_HEADER,
            Secret::new(server_secret.to_string()),
            hmac_checks,
        ))
        .service(RazorpayWebhookRoute::<MockPaymentManager>::new());
    let app = App::new()
        .app_data(web::Data::new(PaymentFlowApi::new(db, EventProducers::default())))
        .service(scope);
    let service = test::init_service(app).await;
    let body = payload.to_string();
    let mut req = test::TestRequest::post()
        .uri("/api/webhooks/razorpay")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.clone());
    if let Some(secret) = secret {
        req = req.insert_header((RAZORPAY_SIGNATURE_HEADER, hmac_sha256_hex(secret.as_bytes(), body.as_bytes())));
    }
    let res = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => res.into_parts().1.map_into_boxed_body(),
        Err(e) => e.error_response(),
    };
    let status = res.status();
    let bytes = actix_web::body::to_bytes(res.into_body()).await.expect("Failed to read response body");
    (status, serde_json::from_slice(&bytes).expect("Response was not JSON"))
}

#[actix_web::test]
async fn missing_signature() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().never();
    let (status, body) = post_webhook(db, &captured_payload(), None, true).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Missing signature" }));
}

#[actix_web::test]
async fn invalid_signature() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().never();
    let (status, body) = post_webhook(db, &captured_payload(), Some("not the webhook secret"), true).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid signature" }));
}

#[actix_web::test]
async fn unset_webhook_secret() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().never();
    // A payload signed with the empty key must not get through a server that has no secret configured
    let (status, body) = post_webhook_to_server(db, "", &captured_payload(), Some(""), true).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Invalid server configuration. Webhook secret not configured" }));
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().never();
    let (status, _) = post_webhook_to_server(db, "  ", &captured_payload(), None, true).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn captured_payment() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment()
        .withf(|c| {
            c.razorpay_order_id == "order_N1x" &&
                c.razorpay_payment_id == "pay_N1y" &&
                c.amount == Paise::from(500_000) &&
                c.method.as_deref() == Some("upi")
        })
        .times(1)
        .returning(|c| {
            let mut p = payment(5, &c.razorpay_order_id);
            p.status = PaymentStatus::Completed;
            p.razorpay_payment_id = Some(c.razorpay_payment_id);
            Ok(Some(CaptureResult { payment: p, bookings: vec![], notifications: vec![], redelivered: false }))
        });
    let (status, body) = post_webhook(db, &captured_payload(), Some(WEBHOOK_SECRET), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn captured_payment_for_unknown_order() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().times(1).returning(|_| Ok(None));
    let (status, body) = post_webhook(db, &captured_payload(), Some(WEBHOOK_SECRET), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn unhandled_events_are_acknowledged() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().never();
    db.expect_process_failed_payment().never();
    db.expect_process_refund().never();
    let payload = json!({ "event": "order.paid", "payload": {} });
    let (status, body) = post_webhook(db, &payload, Some(WEBHOOK_SECRET), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn refund_processed() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_refund()
        .withf(|r| {
            r.razorpay_refund_id == "rfnd_1" && r.razorpay_payment_id == "pay_N1y" && r.amount == Paise::from(250_000)
        })
        .times(1)
        .returning(|r| {
            let mut p = payment(5, "order_N1x");
            p.refunded_amount = r.amount;
            Ok(Some(p))
        });
    let payload = json!({
        "event": "refund.processed",
        "payload": { "refund": { "entity": { "id": "rfnd_1", "payment_id": "pay_N1y", "amount": 250_000 } } }
    });
    let (status, body) = post_webhook(db, &payload, Some(WEBHOOK_SECRET), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn processing_failure() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment()
        .times(1)
        .returning(|_| Err(PaymentGatewayError::DatabaseError("database is locked".into())));
    let (status, body) = post_webhook(db, &captured_payload(), Some(WEBHOOK_SECRET), true).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Webhook processing failed" }));
}

#[actix_web::test]
async fn signature_checks_disabled() {
    let _ = env_logger::try_init();
    let mut db = MockPaymentManager::new();
    db.expect_process_captured_payment().times(1).returning(|_| Ok(None));
    let (status, body) = post_webhook(db, &captured_payload(), None, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
