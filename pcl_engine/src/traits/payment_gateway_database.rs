use thiserror::Error;

use crate::{
    db_types::{CapturedPayment, FailedPayment, NewPayment, Payment, PayoutSummary, ProcessedRefund, UserId},
    traits::data_objects::CaptureResult,
};

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Payment for order {0} does not exist")]
    PaymentNotFound(String),
    #[error("Match {0} does not exist")]
    MatchNotFound(i64),
    #[error("Invalid payment request: {0}")]
    ValidationError(String),
    #[error("Could not reach the payment provider: {0}")]
    ProviderError(String),
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}

/// This trait defines the behaviour for backends that record match payments and react to payment gateway webhooks.
///
/// The webhook flows (`process_captured_payment`, `process_failed_payment` and `process_refund`) each run in a single
/// atomic transaction.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Records a `pending` payment for a newly created gateway order. This call is idempotent on the gateway order id:
    /// if a payment for the order already exists, it is returned unchanged.
    async fn insert_pending_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError>;

    async fn fetch_payment_by_order_id(&self, order_id: &str) -> Result<Option<Payment>, PaymentGatewayError>;

    async fn fetch_payment_by_payment_id(&self, payment_id: &str) -> Result<Option<Payment>, PaymentGatewayError>;

    /// Handles a captured payment. In a single transaction:
    /// * The payment is marked `completed`.
    /// * Bookings are created for the stadium owner, the referee and each staff member of the match.
    /// * The match is marked as paid.
    /// * Each payee's pending payout summary for the current month is credited.
    /// * A `payment_received` notification is stored for each payee.
    ///
    /// If no payment exists for the gateway order, nothing is changed and `None` is returned.
    async fn process_captured_payment(
        &self,
        capture: CapturedPayment,
    ) -> Result<Option<CaptureResult>, PaymentGatewayError>;

    /// Marks the pending payment for the gateway order as `failed`. Returns `None` if there is no such payment, or if
    /// the payment is no longer pending (e.g. a late failure for an attempt on an order that has since been captured).
    async fn process_failed_payment(&self, failure: FailedPayment) -> Result<Option<Payment>, PaymentGatewayError>;

    /// Applies a processed refund to the payment, its bookings and its match. Returns `None` if there is no payment
    /// with the given gateway payment id.
    ///
    /// Refunds are recorded by their gateway refund id. A refund that has already been applied leaves everything
    /// unchanged and the payment is returned as it stands.
    async fn process_refund(&self, refund: ProcessedRefund) -> Result<Option<Payment>, PaymentGatewayError>;

    async fn fetch_payout_summaries(&self, user_id: &UserId) -> Result<Vec<PayoutSummary>, PaymentGatewayError>;
}
