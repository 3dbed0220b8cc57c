use chrono::{DateTime, Utc};
use log::debug;
use sqlx::{types::Json, SqliteConnection};

use crate::db_types::{
    AadhaarRequest,
    BankVerificationRecord,
    BankVerificationStatus,
    NewAadhaarRequest,
    NewPayoutAccount,
    PayoutAccount,
    UserId,
};

pub async fn insert_aadhaar_request(
    request: NewAadhaarRequest,
    conn: &mut SqliteConnection,
) -> Result<AadhaarRequest, sqlx::Error> {
    let request: AadhaarRequest = sqlx::query_as(
        r#"
            INSERT INTO kyc_aadhaar_requests (user_id, club_id, request_id, aadhaar_number, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *;
        "#,
    )
    .bind(request.user_id)
    .bind(request.club_id)
    .bind(request.request_id)
    .bind(request.aadhaar_number)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Aadhaar OTP request {} stored for {}", request.request_id, request.user_id);
    Ok(request)
}

pub async fn fetch_pending_aadhaar_request(
    user_id: &UserId,
    request_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<AadhaarRequest>, sqlx::Error> {
    let request = sqlx::query_as(
        "SELECT * FROM kyc_aadhaar_requests WHERE request_id = $1 AND user_id = $2 AND status = 'pending'",
    )
    .bind(request_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(request)
}

pub async fn mark_aadhaar_request_verified(request_id: &str, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE kyc_aadhaar_requests SET status = 'verified', verified_at = $2 WHERE request_id = $1")
        .bind(request_id)
        .bind(Utc::now())
        .execute(conn)
        .await?;
    Ok(())
}

/// Expires every pending OTP request created before the cutoff.
pub async fn expire_aadhaar_requests(
    cutoff: DateTime<Utc>,
    conn: &mut SqliteConnection,
) -> Result<Vec<AadhaarRequest>, sqlx::Error> {
    let expired = sqlx::query_as(
        r#"
            UPDATE kyc_aadhaar_requests SET status = 'expired'
            WHERE status = 'pending' AND datetime(created_at) < datetime($1)
            RETURNING *;
        "#,
    )
    .bind(cutoff)
    .fetch_all(conn)
    .await?;
    Ok(expired)
}

pub async fn insert_payout_account(
    user_id: &UserId,
    account: NewPayoutAccount,
    conn: &mut SqliteConnection,
) -> Result<PayoutAccount, sqlx::Error> {
    let account: PayoutAccount = sqlx::query_as(
        r#"
            INSERT INTO payout_accounts (user_id, account_number, ifsc_code, account_holder, verification_status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *;
        "#,
    )
    .bind(user_id)
    .bind(account.account_number)
    .bind(account.ifsc_code)
    .bind(account.account_holder)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payout account #{} added for {user_id}", account.id);
    Ok(account)
}

pub async fn fetch_payout_account(
    account_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PayoutAccount>, sqlx::Error> {
    let account =
        sqlx::query_as("SELECT * FROM payout_accounts WHERE id = $1").bind(account_id).fetch_optional(conn).await?;
    Ok(account)
}

pub async fn fetch_payout_accounts(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<PayoutAccount>, sqlx::Error> {
    let accounts = sqlx::query_as("SELECT * FROM payout_accounts WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(accounts)
}

pub async fn update_payout_account(
    account_id: i64,
    account: NewPayoutAccount,
    conn: &mut SqliteConnection,
) -> Result<Option<PayoutAccount>, sqlx::Error> {
    let account = sqlx::query_as(
        r#"
            UPDATE payout_accounts SET
                account_number = $2,
                ifsc_code = $3,
                account_holder = $4,
                verification_status = 'pending',
                verification_id = NULL,
                verification_details = NULL,
                verified_at = NULL,
                is_active = 0,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(account_id)
    .bind(account.account_number)
    .bind(account.ifsc_code)
    .bind(account.account_holder)
    .fetch_optional(conn)
    .await?;
    Ok(account)
}

/// Stores the outcome of a bank verification. A verified account becomes the active payout account.
pub async fn record_bank_verification(
    account_id: i64,
    record: BankVerificationRecord,
    conn: &mut SqliteConnection,
) -> Result<Option<PayoutAccount>, sqlx::Error> {
    let verified = record.status == BankVerificationStatus::Verified;
    let account = sqlx::query_as(
        r#"
            UPDATE payout_accounts SET
                verification_status = $2,
                verification_method = 'bank_account_sync',
                verification_id = $3,
                verification_details = $4,
                verified_at = CASE WHEN $5 THEN $6 ELSE verified_at END,
                is_active = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(account_id)
    .bind(record.status)
    .bind(record.verification_id)
    .bind(Json(record.details))
    .bind(verified)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;
    debug!("🗃️ Bank verification for payout account #{account_id}: {}", record.status);
    Ok(account)
}
