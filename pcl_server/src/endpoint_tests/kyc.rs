use actix_web::{http::StatusCode, web, web::ServiceConfig};
use pcl_engine::{
    db_types::{
        AadhaarRequest,
        AadhaarRequestStatus,
        BankVerificationStatus,
        PayoutAccount,
        UploadedDocument,
        UserId,
        UserRole,
    },
    traits::IntegrationError,
    KycApi,
};
use serde_json::json;

use super::{
    helpers::{club, error_body, json, post_request, timestamp, token_for, user},
    mocks::{MockIdentityVerifier, MockKycManager, MockObjectStore},
};
use crate::routes::{
    AddPayoutAccountRoute,
    ClubRequestOtpRoute,
    PlayerGenerateOtpRoute,
    UpdateBankAccountRoute,
    UploadDocumentsRoute,
    VerifyBankAccountRoute,
};

fn configure(
    db: MockKycManager,
    verifier: MockIdentityVerifier,
    store: MockObjectStore,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(PlayerGenerateOtpRoute::<MockKycManager, MockIdentityVerifier>::new())
            .service(ClubRequestOtpRoute::<MockKycManager, MockIdentityVerifier>::new())
            .service(UploadDocumentsRoute::<MockKycManager, MockObjectStore>::new())
            .service(AddPayoutAccountRoute::<MockKycManager>::new())
            .service(UpdateBankAccountRoute::<MockKycManager>::new())
            .service(VerifyBankAccountRoute::<MockKycManager, MockIdentityVerifier>::new())
            .app_data(web::Data::new(KycApi::new(db)))
            .app_data(web::Data::new(verifier))
            .app_data(web::Data::new(store));
    }
}

fn with_db(db: MockKycManager) -> impl FnOnce(&mut ServiceConfig) {
    configure(db, MockIdentityVerifier::new(), MockObjectStore::new())
}

fn payout_account(id: i64, owner: &str, status: BankVerificationStatus) -> PayoutAccount {
    PayoutAccount {
        id,
        user_id: UserId::from(owner),
        account_number: "50100234567891".into(),
        ifsc_code: "HDFC0001234".into(),
        account_holder: "Arjun Menon".into(),
        verification_status: status,
        verification_method: None,
        verification_id: None,
        verification_details: None,
        verified_at: None,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

//--------------------------------------------   Aadhaar OTP   --------------------------------------------------------

#[actix_web::test]
async fn player_requests_otp() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_user().times(1).returning(|id| Ok(Some(user(id.as_str(), UserRole::Player))));
    db.expect_fetch_verified_player_with_aadhaar()
        .withf(|aadhaar, id| aadhaar == "234567890123" && id.as_str() == "player-1")
        .times(1)
        .returning(|_, _| Ok(None));
    db.expect_insert_aadhaar_request()
        .withf(|r| r.request_id == "48213" && r.club_id.is_none() && r.aadhaar_number == "234567890123")
        .times(1)
        .returning(|r| {
            Ok(AadhaarRequest {
                id: 1,
                user_id: r.user_id,
                club_id: r.club_id,
                request_id: r.request_id,
                aadhaar_number: r.aadhaar_number,
                status: AadhaarRequestStatus::Pending,
                created_at: timestamp(),
                verified_at: None,
            })
        });
    let mut verifier = MockIdentityVerifier::new();
    verifier
        .expect_request_aadhaar_otp()
        .withf(|aadhaar| aadhaar == "234567890123")
        .times(1)
        .returning(|_| Ok(json!({ "ref_id": "48213", "message": "OTP sent" })));
    let token = token_for("player-1", UserRole::Player);
    let body = json!({ "aadhaar_number": "2345 6789 0123" });
    let (status, body) =
        post_request(&token, "/kyc/player/generate-otp", body, configure(db, verifier, MockObjectStore::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "success": true,
            "request_id": "48213",
            "message": "OTP sent successfully to your registered mobile number"
        })
    );
}

#[actix_web::test]
async fn player_otp_needs_twelve_digits() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_user().never();
    let token = token_for("player-1", UserRole::Player);
    let body = json!({ "aadhaarNumber": "12345" });
    let (status, body) = post_request(&token, "/kyc/player/generate-otp", body, with_db(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Invalid Aadhaar number format. Must be 12 digits."));
}

#[actix_web::test]
async fn player_otp_is_for_players() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_user().times(1).returning(|id| Ok(Some(user(id.as_str(), UserRole::ClubOwner))));
    db.expect_fetch_verified_player_with_aadhaar().never();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "aadhaar_number": "234567890123" });
    let (status, body) = post_request(&token, "/kyc/player/generate-otp", body, with_db(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error_body("This endpoint is only for players"));
}

#[actix_web::test]
async fn aadhaar_already_registered_to_a_player() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_user().returning(|id| Ok(Some(user(id.as_str(), UserRole::Player))));
    db.expect_fetch_verified_player_with_aadhaar()
        .times(1)
        .returning(|_, _| Ok(Some(user("player-7", UserRole::Player))));
    db.expect_insert_aadhaar_request().never();
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_request_aadhaar_otp().never();
    let token = token_for("player-1", UserRole::Player);
    let body = json!({ "aadhaar_number": "234567890123" });
    let (status, body) =
        post_request(&token, "/kyc/player/generate-otp", body, configure(db, verifier, MockObjectStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["error"], "Aadhaar Already Registered");
    assert!(body["message"].as_str().is_some_and(|m| m.contains("one player")));
}

#[actix_web::test]
async fn otp_without_a_request_id() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_user().returning(|id| Ok(Some(user(id.as_str(), UserRole::Player))));
    db.expect_fetch_verified_player_with_aadhaar().returning(|_, _| Ok(None));
    db.expect_insert_aadhaar_request().never();
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_request_aadhaar_otp().times(1).returning(|_| Ok(json!({ "status": "SUCCESS" })));
    let token = token_for("player-1", UserRole::Player);
    let body = json!({ "aadhaar_number": "234567890123" });
    let (status, body) =
        post_request(&token, "/kyc/player/generate-otp", body, configure(db, verifier, MockObjectStore::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error_body("Failed to generate OTP - no request ID received"));
}

#[actix_web::test]
async fn club_otp_needs_the_club_owner() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_owned_club().times(1).returning(|id| Ok(Some(club(4, id.as_str()))));
    db.expect_fetch_user_with_aadhaar().never();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "aadhaar_number": "234567890123", "club_id": 9 });
    let (status, body) = post_request(&token, "/kyc/request-aadhaar-otp", body, with_db(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error_body("Unauthorized to verify for this club"));
}

#[actix_web::test]
async fn club_otp_rejects_duplicate_aadhaar() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_owned_club().returning(|id| Ok(Some(club(4, id.as_str()))));
    db.expect_fetch_user_with_aadhaar()
        .withf(|aadhaar, id| aadhaar == "234567890123" && id.as_str() == "owner-1")
        .times(1)
        .returning(|_, _| Ok(Some(user("owner-5", UserRole::ClubOwner))));
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_request_aadhaar_otp().never();
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "aadhaarNumber": "234567890123", "clubId": 4 });
    let (status, body) =
        post_request(&token, "/kyc/request-aadhaar-otp", body, configure(db, verifier, MockObjectStore::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body),
        json!({ "error": "This Aadhaar number is already registered with another club", "code": "DUPLICATE_AADHAAR" })
    );
}

//--------------------------------------------   Documents   ----------------------------------------------------------

#[actix_web::test]
async fn upload_club_documents() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_owned_club().returning(|id| Ok(Some(club(4, id.as_str()))));
    db.expect_record_club_documents()
        .withf(|c, docs| c.id == 4 && docs.len() == 1 && docs[0].file_name == "registration.pdf")
        .times(1)
        .returning(|c, _| Ok(c.clone()));
    let mut store = MockObjectStore::new();
    store
        .expect_upload()
        .withf(|bucket, path, content_type, data| {
            bucket == "kyc-documents" &&
                path.starts_with("4/") &&
                path.ends_with("_registration.pdf") &&
                content_type == "application/pdf" &&
                data.as_slice() == b"hello"
        })
        .times(1)
        .returning(|bucket, path, _, _| Ok(format!("https://storage.example.com/{bucket}/{path}")));
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({
        "club_id": 4,
        "documents": [{ "file_name": "registration.pdf", "content_type": "application/pdf", "data": "aGVsbG8=" }]
    });
    let (status, body) =
        post_request(&token, "/kyc/documents-upload", body, configure(db, MockIdentityVerifier::new(), store)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "pending_admin_review");
    let documents: Vec<UploadedDocument> = serde_json::from_value(body["documents"].clone()).unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].url.starts_with("https://storage.example.com/kyc-documents/4/"));
}

#[actix_web::test]
async fn failed_uploads_record_nothing() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_owned_club().returning(|id| Ok(Some(club(4, id.as_str()))));
    db.expect_record_club_documents().never();
    let mut store = MockObjectStore::new();
    store
        .expect_upload()
        .times(1)
        .returning(|_, _, _, _| Err(IntegrationError::Rejected { status: 413, message: "Payload too large".into() }));
    let token = token_for("owner-1", UserRole::ClubOwner);
    let body = json!({ "clubId": 4, "documents": [{ "fileName": "registration.pdf", "data": "aGVsbG8=" }] });
    let (status, body) =
        post_request(&token, "/kyc/documents-upload", body, configure(db, MockIdentityVerifier::new(), store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, error_body("Failed to upload registration.pdf"));
}

//--------------------------------------------   Bank accounts   ------------------------------------------------------

#[actix_web::test]
async fn add_payout_account() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_insert_payout_account()
        .withf(|id, a| id.as_str() == "ref-3" && a.ifsc_code == "HDFC0001234" && a.account_number == "50100234567891")
        .times(1)
        .returning(|id, _| Ok(payout_account(6, id.as_str(), BankVerificationStatus::Pending)));
    let token = token_for("ref-3", UserRole::Referee);
    let body = json!({
        "accountNumber": " 50100234567891 ",
        "ifscCode": "hdfc0001234",
        "accountHolder": "Arjun Menon"
    });
    let (status, body) = post_request(&token, "/kyc/payout-accounts", body, with_db(db)).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = json(&body);
    assert_eq!(body["id"], 6);
    assert_eq!(body["verification_status"], "pending");
}

#[actix_web::test]
async fn payout_account_needs_every_field() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_insert_payout_account().never();
    let token = token_for("ref-3", UserRole::Referee);
    let body = json!({ "account_number": "50100234567891", "ifsc_code": "HDFC0001234" });
    let (status, body) = post_request(&token, "/kyc/payout-accounts", body, with_db(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Missing required fields: accountNumber, ifscCode, accountHolder"));
}

#[actix_web::test]
async fn cannot_edit_someone_elses_account() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_payout_account()
        .times(1)
        .returning(|id| Ok(Some(payout_account(id, "ref-8", BankVerificationStatus::Pending))));
    db.expect_update_payout_account().never();
    let token = token_for("ref-3", UserRole::Referee);
    let body = json!({
        "accountId": 6,
        "accountNumber": "50100234567891",
        "ifscCode": "HDFC0001234",
        "accountHolder": "Arjun Menon"
    });
    let (status, body) = post_request(&token, "/kyc/update-bank-account", body, with_db(db)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, error_body("Cannot edit another user's account"));
}

#[actix_web::test]
async fn verified_accounts_are_locked() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_payout_account()
        .times(1)
        .returning(|id| Ok(Some(payout_account(id, "ref-3", BankVerificationStatus::Verified))));
    db.expect_update_payout_account().never();
    let token = token_for("ref-3", UserRole::Referee);
    let body = json!({
        "account_id": 6,
        "account_number": "50100234567891",
        "ifsc_code": "HDFC0001234",
        "account_holder": "Arjun Menon"
    });
    let (status, body) = post_request(&token, "/kyc/update-bank-account", body, with_db(db)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("Cannot edit verified accounts. Please delete and create a new one."));
}

#[actix_web::test]
async fn verify_bank_account() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_payout_account()
        .times(1)
        .returning(|id| Ok(Some(payout_account(id, "ref-3", BankVerificationStatus::Pending))));
    db.expect_record_bank_verification()
        .withf(|id, r| {
            *id == 6 && r.status == BankVerificationStatus::Verified && r.verification_id.as_deref() == Some("3417")
        })
        .times(1)
        .returning(|id, r| {
            let mut account = payout_account(id, "ref-3", r.status);
            account.verified_at = Some(timestamp());
            Ok(account)
        });
    let mut verifier = MockIdentityVerifier::new();
    verifier
        .expect_verify_bank_account()
        .withf(|check| check.ifsc_code == "HDFC0001234" && check.account_holder == "Arjun Menon")
        .times(1)
        .returning(|_| {
            Ok(json!({
                "reference_id": 3417,
                "name_at_bank": "ARJUN MENON",
                "bank_name": "HDFC Bank",
                "name_match_score": "100.00",
                "name_match_result": "GOOD_MATCH",
                "account_status": "VALID",
                "city": "KOCHI",
                "branch": "MG ROAD"
            }))
        });
    let token = token_for("ref-3", UserRole::Referee);
    let (status, body) = post_request(
        &token,
        "/kyc/verify-bank-account",
        json!({ "accountId": 6 }),
        configure(db, verifier, MockObjectStore::new()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({
            "success": true,
            "status": "verified",
            "message": "✅ Your bank account has been verified successfully!",
            "details": {
                "referenceId": "3417",
                "nameAtBank": "ARJUN MENON",
                "bankName": "HDFC Bank",
                "nameMatchScore": "100.00",
                "nameMatchResult": "GOOD_MATCH",
                "accountStatus": "VALID",
                "city": "KOCHI",
                "branch": "MG ROAD"
            }
        })
    );
}

#[actix_web::test]
async fn verify_unknown_bank_account() {
    let _ = env_logger::try_init();
    let mut db = MockKycManager::new();
    db.expect_fetch_payout_account()
        .times(1)
        .returning(|id| Ok(Some(payout_account(id, "ref-8", BankVerificationStatus::Pending))));
    db.expect_record_bank_verification().never();
    let mut verifier = MockIdentityVerifier::new();
    verifier.expect_verify_bank_account().never();
    let token = token_for("ref-3", UserRole::Referee);
    let (status, body) = post_request(
        &token,
        "/kyc/verify-bank-account",
        json!({ "account_id": 6 }),
        configure(db, verifier, MockObjectStore::new()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("Account not found"));
}
