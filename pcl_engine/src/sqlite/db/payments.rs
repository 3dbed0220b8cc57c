use chrono::{NaiveDate, Utc};
use log::debug;
use pcl_common::Paise;
use serde_json::json;
use sqlx::{types::Json, SqliteConnection};

use crate::db_types::{
    Booking,
    CapturedPayment,
    FailedPayment,
    NewBooking,
    NewPayment,
    Payment,
    PayoutCredit,
    PayoutSummary,
    ProcessedRefund,
    RefundStatus,
    UserId,
};

/// Inserts the payment, returning `false` in the second parameter if a payment for the order already exists.
pub async fn idempotent_insert(
    payment: NewPayment,
    conn: &mut SqliteConnection,
) -> Result<(Payment, bool), sqlx::Error> {
    let inserted = match fetch_payment_by_order_id(&payment.razorpay_order_id, conn).await? {
        Some(existing) => (existing, false),
        None => {
            let payment = insert_payment(payment, conn).await?;
            debug!("🗃️ Pending payment #{} recorded for order {}", payment.id, payment.razorpay_order_id);
            (payment, true)
        },
    };
    Ok(inserted)
}

async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, sqlx::Error> {
    let b = payment.breakdown;
    let payment = sqlx::query_as(
        r#"
            INSERT INTO payments (
                razorpay_order_id,
                match_id,
                club_id,
                amount,
                currency,
                status,
                stadium,
                stadium_commission,
                referee,
                referee_commission,
                staff,
                staff_commission,
                notes
            ) VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10, $11, $12)
            RETURNING *;
        "#,
    )
    .bind(payment.razorpay_order_id)
    .bind(payment.match_id)
    .bind(payment.club_id)
    .bind(payment.amount)
    .bind(payment.currency)
    .bind(b.stadium)
    .bind(b.stadium_commission)
    .bind(b.referee)
    .bind(b.referee_commission)
    .bind(b.staff)
    .bind(b.staff_commission)
    .bind(payment.notes.map(Json))
    .fetch_one(conn)
    .await?;
    Ok(payment)
}

pub async fn fetch_payment_by_order_id(
    order_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE razorpay_order_id = $1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

pub async fn fetch_payment_by_payment_id(
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE razorpay_payment_id = $1 ORDER BY id DESC LIMIT 1")
        .bind(payment_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

pub async fn fetch_latest_payment_for_match(
    match_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE match_id = $1 ORDER BY id DESC LIMIT 1")
        .bind(match_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

pub async fn mark_payment_completed(
    id: i64,
    capture: &CapturedPayment,
    conn: &mut SqliteConnection,
) -> Result<Payment, sqlx::Error> {
    let now = Utc::now();
    let payment = sqlx::query_as(
        r#"
            UPDATE payments SET
                status = 'completed',
                razorpay_payment_id = $2,
                payment_method = $3,
                completed_at = $4,
                webhook_received = 1,
                webhook_data = $5,
                webhook_received_at = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(id)
    .bind(&capture.razorpay_payment_id)
    .bind(&capture.method)
    .bind(now)
    .bind(Json(&capture.webhook_data))
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment #{id} completed with gateway payment {}", capture.razorpay_payment_id);
    Ok(payment)
}

/// Marks the pending payment for the order as failed. The gateway's error code and description are kept in `notes`.
///
/// Payments that have already been captured, failed or refunded are left alone, and `None` is returned.
pub async fn mark_payment_failed(
    failure: &FailedPayment,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let notes = json!({
        "error_code": failure.error_code,
        "error_description": failure.error_description,
    });
    let payment = sqlx::query_as(
        r#"
            UPDATE payments SET
                status = 'failed',
                razorpay_payment_id = COALESCE($2, razorpay_payment_id),
                notes = $3,
                webhook_received = 1,
                webhook_data = $4,
                webhook_received_at = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE razorpay_order_id = $1 AND status = 'pending'
            RETURNING *;
        "#,
    )
    .bind(&failure.razorpay_order_id)
    .bind(&failure.razorpay_payment_id)
    .bind(Json(notes))
    .bind(Json(&failure.webhook_data))
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;
    Ok(payment)
}

/// Adds the refund to the payment's running refund total and marks the payment as refunded.
pub async fn apply_refund(
    payment: &Payment,
    amount: Paise,
    webhook_data: &serde_json::Value,
    conn: &mut SqliteConnection,
) -> Result<Payment, sqlx::Error> {
    let total = payment.refunded_amount + amount;
    let refund_status = if total >= payment.amount { RefundStatus::Full } else { RefundStatus::Partial };
    let payment: Payment = sqlx::query_as(
        r#"
            UPDATE payments SET
                status = 'refunded',
                refund_status = $2,
                refunded_amount = $3,
                refunded_at = $4,
                webhook_data = $5,
                webhook_received_at = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING *;
        "#,
    )
    .bind(payment.id)
    .bind(refund_status)
    .bind(total)
    .bind(Utc::now())
    .bind(Json(webhook_data))
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Payment #{} refunded ({refund_status}), {total} in total", payment.id);
    Ok(payment)
}

pub async fn insert_booking(
    payment_id: i64,
    match_id: i64,
    booking: NewBooking,
    conn: &mut SqliteConnection,
) -> Result<Booking, sqlx::Error> {
    let net_payout = booking.net_payout();
    let booking = sqlx::query_as(
        r#"
            INSERT INTO bookings (
                payment_id,
                match_id,
                booking_type,
                resource_id,
                amount,
                commission,
                net_payout,
                status,
                confirmed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed', $8)
            RETURNING *;
        "#,
    )
    .bind(payment_id)
    .bind(match_id)
    .bind(booking.booking_type)
    .bind(booking.resource_id)
    .bind(booking.amount)
    .bind(booking.commission)
    .bind(net_payout)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    Ok(booking)
}

pub async fn fetch_bookings_for_payment(
    payment_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Booking>, sqlx::Error> {
    let bookings = sqlx::query_as("SELECT * FROM bookings WHERE payment_id = $1 ORDER BY id")
        .bind(payment_id)
        .fetch_all(conn)
        .await?;
    Ok(bookings)
}

/// Records the gateway refund against the payment. Returns `false` if the refund has been recorded before.
pub async fn record_refund(
    payment_id: i64,
    refund: &ProcessedRefund,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
            INSERT INTO payment_refunds (razorpay_refund_id, payment_id, amount, webhook_data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (razorpay_refund_id) DO NOTHING
        "#,
    )
    .bind(&refund.razorpay_refund_id)
    .bind(payment_id)
    .bind(refund.amount)
    .bind(Json(&refund.webhook_data))
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Cancels every booking paid for by the payment. Each booking carries its pro-rata share of the refund, so the
/// booking refunds add up to (at most) the refunded amount.
pub async fn cancel_bookings(
    payment: &Payment,
    refund_amount: Paise,
    conn: &mut SqliteConnection,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
            UPDATE bookings SET
                status = 'cancelled',
                refund_processed = 1,
                refund_amount = COALESCE(refund_amount, 0) + (amount * $2) / $3,
                cancelled_at = COALESCE(cancelled_at, $4)
            WHERE payment_id = $1
        "#,
    )
    .bind(payment.id)
    .bind(refund_amount)
    .bind(payment.amount.value().max(1))
    .bind(Utc::now())
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Adds the credit to the payee's pending payout summary for the period, creating the summary if necessary.
pub async fn credit_payout(
    credit: &PayoutCredit,
    period: (NaiveDate, NaiveDate),
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    let (start, end) = period;
    sqlx::query(
        r#"
            INSERT INTO pending_payouts_summary (
                user_id,
                user_role,
                payout_period_start,
                payout_period_end,
                total_pending_amount,
                total_pending_count,
                last_updated
            ) VALUES ($1, $2, $3, $4, $5, 1, $6)
            ON CONFLICT (user_id, payout_period_start, payout_period_end) DO UPDATE SET
                total_pending_amount = pending_payouts_summary.total_pending_amount + excluded.total_pending_amount,
                total_pending_count = pending_payouts_summary.total_pending_count + 1,
                last_updated = excluded.last_updated
        "#,
    )
    .bind(&credit.user_id)
    .bind(credit.role)
    .bind(start)
    .bind(end)
    .bind(credit.amount)
    .bind(Utc::now())
    .execute(conn)
    .await?;
    debug!("🗃️ {} credited to the pending payouts of {}", credit.amount, credit.user_id);
    Ok(())
}

pub async fn fetch_payout_summaries(
    user_id: &UserId,
    conn: &mut SqliteConnection,
) -> Result<Vec<PayoutSummary>, sqlx::Error> {
    let summaries =
        sqlx::query_as("SELECT * FROM pending_payouts_summary WHERE user_id = $1 ORDER BY payout_period_start DESC")
            .bind(user_id)
            .fetch_all(conn)
            .await?;
    Ok(summaries)
}
